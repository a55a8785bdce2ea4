const PRODUCTS: [(&str, &str); 20] = [
    ("trna", "tRNA-Ala"),
    ("trnc", "tRNA-Cys"),
    ("trnd", "tRNA-Asp"),
    ("trne", "tRNA-Glu"),
    ("trnf", "tRNA-Phe"),
    ("trng", "tRNA-Gly"),
    ("trnh", "tRNA-His"),
    ("trni", "tRNA-Ile"),
    ("trnk", "tRNA-Lys"),
    ("trnl", "tRNA-Leu"),
    ("trnm", "tRNA-Met"),
    ("trnn", "tRNA-Asn"),
    ("trnp", "tRNA-Pro"),
    ("trnq", "tRNA-Gln"),
    ("trnr", "tRNA-Arg"),
    ("trns", "tRNA-Ser"),
    ("trnt", "tRNA-Thr"),
    ("trnv", "tRNA-Val"),
    ("trnw", "tRNA-Trp"),
    ("trny", "tRNA-Tyr"),
];

pub(crate) fn can_handle(name: &str) -> bool {
    name.to_ascii_lowercase().starts_with("trn")
}

/// Returns the tRNA product of a lowercase gene name
///
/// Isoacceptor names with a numeric suffix (`trnl1`, `trns2`) use the
/// product of their 4-letter code.
pub(crate) fn product(name: &str) -> Option<&'static str> {
    let code = match name.get(4..) {
        Some(suffix) if !suffix.is_empty() && suffix.bytes().all(|b| b.is_ascii_digit()) => {
            &name[..4]
        }
        _ => name,
    };
    PRODUCTS
        .iter()
        .find(|(key, _)| *key == code)
        .map(|(_, product)| *product)
}

/// Anticodons are given as 3 letter qualifier, e.g. `trnF(gaa)`
pub(crate) fn anticodon_note(qualifier: Option<&str>) -> Option<String> {
    qualifier
        .filter(|q| q.chars().count() == 3)
        .map(|q| format!("anticodon:{}", q.to_lowercase()))
}
