use std::path::Path;

use dicom::core::value::DataSetSequence;
use dicom::core::{dicom_value, DataElement, PrimitiveValue, Tag, VR};
use dicom::object::{FileMetaTableBuilder, InMemDicomObject};
use dvhextract::model::header::tag;

const EXPLICIT_VR_LITTLE_ENDIAN: &str = "1.2.840.10008.1.2.1";
const CT_IMAGE_STORAGE: &str = "1.2.840.10008.5.1.4.1.1.2";
const RT_DOSE_STORAGE: &str = "1.2.840.10008.5.1.4.1.1.481.2";
const RT_STRUCTURE_SET_STORAGE: &str = "1.2.840.10008.5.1.4.1.1.481.3";
const RT_PLAN_STORAGE: &str = "1.2.840.10008.5.1.4.1.1.481.5";

fn put(object: &mut InMemDicomObject, tag: Tag, vr: VR, value: &str) {
    object.put(DataElement::new(tag, vr, PrimitiveValue::from(value)));
}

fn put_items(object: &mut InMemDicomObject, tag: Tag, items: Vec<InMemDicomObject>) {
    object.put(DataElement::new(tag, VR::SQ, DataSetSequence::from(items)));
}

fn item(tag: Tag, vr: VR, value: &str) -> InMemDicomObject {
    let mut object = InMemDicomObject::new_empty();
    put(&mut object, tag, vr, value);
    object
}

fn base(patient_id: &str, modality: &str, sop_uid: &str) -> InMemDicomObject {
    let mut object = InMemDicomObject::new_empty();
    put(&mut object, tag::SOP_INSTANCE_UID, VR::UI, sop_uid);
    put(&mut object, tag::MODALITY, VR::CS, modality);
    put(&mut object, tag::PATIENT_NAME, VR::PN, "Phantom^Pelvis");
    put(&mut object, tag::PATIENT_ID, VR::LO, patient_id);
    object
}

fn write(dir: &Path, name: &str, object: InMemDicomObject, sop_class: &str, sop_uid: &str) {
    let file = object
        .with_meta(
            FileMetaTableBuilder::new()
                .transfer_syntax(EXPLICIT_VR_LITTLE_ENDIAN)
                .media_storage_sop_class_uid(sop_class)
                .media_storage_sop_instance_uid(sop_uid),
        )
        .expect("file meta");
    file.write_to_file(dir.join(name)).expect("write DICOM file");
}

pub fn write_ct_slice(dir: &Path, name: &str, patient_id: &str, sop_uid: &str, series: &str, frame: &str) {
    let mut object = base(patient_id, "CT", sop_uid);
    put(&mut object, tag::SERIES_INSTANCE_UID, VR::UI, series);
    put(&mut object, tag::FRAME_OF_REFERENCE_UID, VR::UI, frame);
    write(dir, name, object, CT_IMAGE_STORAGE, sop_uid);
}

/// ROIs are `(number, name, contour count)`.
pub fn write_rtstruct(
    dir: &Path,
    name: &str,
    patient_id: &str,
    sop_uid: &str,
    frame: &str,
    rois: &[(&str, &str, usize)],
) {
    let mut object = base(patient_id, "RTSTRUCT", sop_uid);
    put_items(
        &mut object,
        tag::REFERENCED_FRAME_OF_REFERENCE_SEQUENCE,
        vec![item(tag::FRAME_OF_REFERENCE_UID, VR::UI, frame)],
    );

    let mut roi_items = Vec::new();
    let mut contour_items = Vec::new();
    for (number, roi_name, contours) in rois {
        let mut roi = item(tag::ROI_NUMBER, VR::IS, number);
        put(&mut roi, tag::ROI_NAME, VR::LO, roi_name);
        roi_items.push(roi);

        let mut contour = item(tag::REFERENCED_ROI_NUMBER, VR::IS, number);
        contour.put(DataElement::new(
            tag::ROI_DISPLAY_COLOR,
            VR::IS,
            dicom_value!(Strs, ["0", "128", "255"]),
        ));
        let contour_list = (0..*contours)
            .map(|_| InMemDicomObject::new_empty())
            .collect();
        put_items(&mut contour, tag::CONTOUR_SEQUENCE, contour_list);
        contour_items.push(contour);
    }
    put_items(&mut object, tag::STRUCTURE_SET_ROI_SEQUENCE, roi_items);
    put_items(&mut object, tag::ROI_CONTOUR_SEQUENCE, contour_items);
    write(dir, name, object, RT_STRUCTURE_SET_STORAGE, sop_uid);
}

pub fn write_rtplan(
    dir: &Path,
    name: &str,
    patient_id: &str,
    sop_uid: &str,
    structure_set: &str,
    prescription: &str,
) {
    let mut object = base(patient_id, "RTPLAN", sop_uid);
    put(&mut object, tag::RT_PLAN_LABEL, VR::SH, "PELVIS");
    put(&mut object, tag::RT_PLAN_NAME, VR::LO, "Pelvis VMAT");
    put_items(
        &mut object,
        tag::DOSE_REFERENCE_SEQUENCE,
        vec![item(tag::TARGET_PRESCRIPTION_DOSE, VR::DS, prescription)],
    );
    put_items(
        &mut object,
        tag::REFERENCED_STRUCTURE_SET_SEQUENCE,
        vec![item(tag::REFERENCED_SOP_INSTANCE_UID, VR::UI, structure_set)],
    );
    write(dir, name, object, RT_PLAN_STORAGE, sop_uid);
}

pub fn write_rtdose(dir: &Path, name: &str, patient_id: &str, sop_uid: &str, plan: &str, summation: &str) {
    let mut object = base(patient_id, "RTDOSE", sop_uid);
    put(&mut object, tag::DOSE_UNITS, VR::CS, "GY");
    put(&mut object, tag::DOSE_TYPE, VR::CS, "PHYSICAL");
    put(&mut object, tag::DOSE_SUMMATION_TYPE, VR::CS, summation);
    put_items(
        &mut object,
        tag::REFERENCED_RT_PLAN_SEQUENCE,
        vec![item(tag::REFERENCED_SOP_INSTANCE_UID, VR::UI, plan)],
    );
    write(dir, name, object, RT_DOSE_STORAGE, sop_uid);
}

pub fn write_other(dir: &Path, name: &str, patient_id: &str, modality: &str, sop_uid: &str) {
    write(dir, name, base(patient_id, modality, sop_uid), CT_IMAGE_STORAGE, sop_uid);
}
