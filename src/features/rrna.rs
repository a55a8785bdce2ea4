pub(crate) fn can_handle(name: &str) -> bool {
    name.to_ascii_lowercase().starts_with("rrn")
}

pub(crate) fn product(name: &str) -> Option<&'static str> {
    match name {
        "rrn12" | "rrns" => Some("12S ribosomal RNA"),
        "rrn16" | "rrnl" => Some("16S ribosomal RNA"),
        _ => None,
    }
}
