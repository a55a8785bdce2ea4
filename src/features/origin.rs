pub(crate) fn can_handle(name: &str) -> bool {
    name.eq_ignore_ascii_case("OL") || name.eq_ignore_ascii_case("OH")
}

pub(crate) fn note(name: &str) -> &'static str {
    if name.eq_ignore_ascii_case("OL") {
        "origin of light strand replication (OL)"
    } else {
        "origin of heavy strand replication (OH)"
    }
}
