/// Brings mitochondrial gene names into their canonical spelling
///
/// Recognised prefixes are replaced and everything after the prefix is kept,
/// all other names are returned unchanged.
///
/// | input | output |
/// |---|---|
/// | `nad4l` | `ND4L` |
/// | `nad1_2` | `ND1_2` |
/// | `cox1-a` | `COX1-a` |
/// | `atp6` | `ATP6` |
/// | `cob`, `cytb` | `CYTB` |
/// | `rrns` / `rrnl` | `rrn12` / `rrn16` |
///
/// # Examples
/// ```rust
/// use gbconvert::features::standardize_gene_name;
///
/// assert_eq!(standardize_gene_name("nad4L"), "ND4L");
/// assert_eq!(standardize_gene_name("cox1-a"), "COX1-a");
/// assert_eq!(standardize_gene_name("trnF"), "trnF");
/// ```
pub fn standardize_gene_name(name: &str) -> String {
    let lower = name.to_ascii_lowercase();
    match lower.as_str() {
        "cob" | "cytb" => return "CYTB".to_string(),
        "rrns" => return "rrn12".to_string(),
        "rrnl" => return "rrn16".to_string(),
        _ => {}
    }

    if lower.starts_with("nad4l") {
        return format!("ND4L{}", &name[5..]);
    }
    for (prefix, replacement) in [("nad", "ND"), ("cox", "COX"), ("atp", "ATP")] {
        if lower.starts_with(prefix) && followed_by_digit(&lower, prefix.len()) {
            return format!("{}{}", replacement, &name[prefix.len()..]);
        }
    }
    name.to_string()
}

fn followed_by_digit(name: &str, position: usize) -> bool {
    name.as_bytes()
        .get(position)
        .map(|b| b.is_ascii_digit())
        .unwrap_or(false)
}
