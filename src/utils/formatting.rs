use dicom::core::Tag;

pub fn format_tag(tag: Tag) -> String {
    format!("({:04X},{:04X})", tag.group(), tag.element())
}

/// Shortens a UID for one-line reports, keeping the distinguishing tail.
pub fn short_uid(uid: &str, max_len: usize) -> String {
    let count = uid.chars().count();
    if count <= max_len || max_len < 2 {
        return uid.to_string();
    }
    let tail: String = uid.chars().skip(count - (max_len - 1)).collect();
    format!("…{tail}")
}
