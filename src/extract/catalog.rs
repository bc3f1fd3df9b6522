use std::collections::BTreeMap;
use std::path::Path;

use super::service::{StructureCatalog, StructureInfo};
use crate::error::ServiceResult;
use crate::model::header::{int, ints, items, open_header, tag, text, Header};

const DEFAULT_COLOR: [u8; 3] = [0, 0, 0];

/// Lists ROIs straight from an RTSTRUCT header.
#[derive(Debug, Clone, Copy, Default)]
pub struct RtStructCatalog;

impl StructureCatalog for RtStructCatalog {
    fn structures(&self, structure_set: &Path) -> ServiceResult<BTreeMap<i32, StructureInfo>> {
        let object = open_header(structure_set)?;
        Ok(structures_from_header(&object))
    }
}

/// Joins the Structure Set ROI Sequence with the ROI Contour Sequence on ROI number.
pub fn structures_from_header(header: &Header) -> BTreeMap<i32, StructureInfo> {
    let mut structures = BTreeMap::new();
    for roi in items(header, tag::STRUCTURE_SET_ROI_SEQUENCE) {
        let Some(id) = int(roi, tag::ROI_NUMBER) else {
            log::warn!("Skipping ROI without ROI number");
            continue;
        };
        let name = text(roi, tag::ROI_NAME).unwrap_or_else(|| format!("ROI {id}"));
        structures.insert(
            id,
            StructureInfo {
                id,
                name,
                color: DEFAULT_COLOR,
                empty: true,
            },
        );
    }

    for contour in items(header, tag::ROI_CONTOUR_SEQUENCE) {
        let Some(structure) = int(contour, tag::REFERENCED_ROI_NUMBER)
            .and_then(|id| structures.get_mut(&id))
        else {
            continue;
        };
        if let Some(color) = ints(contour, tag::ROI_DISPLAY_COLOR).and_then(|rgb| to_color(&rgb)) {
            structure.color = color;
        }
        structure.empty = items(contour, tag::CONTOUR_SEQUENCE).is_empty();
    }

    structures
}

fn to_color(rgb: &[i32]) -> Option<[u8; 3]> {
    match rgb {
        [r, g, b] => Some([channel(*r), channel(*g), channel(*b)]),
        _ => None,
    }
}

fn channel(value: i32) -> u8 {
    value.clamp(0, 255) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::header::fixtures::{base, put_sequence, put_text};
    use dicom::core::{dicom_value, DataElement, VR};

    fn roi(number: &str, name: &str) -> Header {
        let mut item = Header::new_empty();
        put_text(&mut item, tag::ROI_NUMBER, VR::IS, number);
        put_text(&mut item, tag::ROI_NAME, VR::LO, name);
        item
    }

    fn roi_contour(number: &str, color: [i32; 3], contours: usize) -> Header {
        let mut item = Header::new_empty();
        put_text(&mut item, tag::REFERENCED_ROI_NUMBER, VR::IS, number);
        item.put(DataElement::new(
            tag::ROI_DISPLAY_COLOR,
            VR::IS,
            dicom_value!(I32, [color[0], color[1], color[2]]),
        ));
        let contour_items = (0..contours).map(|_| Header::new_empty()).collect();
        put_sequence(&mut item, tag::CONTOUR_SEQUENCE, contour_items);
        item
    }

    fn structure_set() -> Header {
        let mut header = base("P1", "RTSTRUCT", "RS.1");
        put_sequence(
            &mut header,
            tag::STRUCTURE_SET_ROI_SEQUENCE,
            vec![roi("1", "PTV"), roi("2", "Rectum"), roi("3", "Couch")],
        );
        put_sequence(
            &mut header,
            tag::ROI_CONTOUR_SEQUENCE,
            vec![roi_contour("1", [255, 0, 0], 2), roi_contour("2", [0, 300, -4], 0)],
        );
        header
    }

    #[test]
    fn joins_names_colors_and_contours() {
        let structures = structures_from_header(&structure_set());
        assert_eq!(structures.len(), 3);

        let ptv = &structures[&1];
        assert_eq!(ptv.name, "PTV");
        assert_eq!(ptv.color, [255, 0, 0]);
        assert!(!ptv.empty);
    }

    #[test]
    fn roi_without_contours_is_empty() {
        let structures = structures_from_header(&structure_set());
        assert!(structures[&2].empty);
        assert_eq!(structures[&2].color, [0, 255, 0]);
        assert!(structures[&3].empty);
        assert_eq!(structures[&3].color, DEFAULT_COLOR);
    }

    #[test]
    fn header_without_rois_has_no_structures() {
        assert!(structures_from_header(&base("P1", "RTSTRUCT", "RS.1")).is_empty());
    }
}
