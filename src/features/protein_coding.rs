use std::sync::LazyLock;

use regex::Regex;

const KNOWN_GENES: [&str; 26] = [
    "cds", "gene", "exon", "mrna", "nad1", "nad2", "nad3", "nad4", "nad4l", "nad5", "nad6", "nd1",
    "nd2", "nd3", "nd4", "nd4l", "nd5", "nd6", "cox1", "cox2", "cox3", "atp6", "atp8", "cob",
    "cytb", "gpi",
];

const PRODUCTS: [(&str, &str); 28] = [
    ("nad1", "NADH dehydrogenase subunit 1"),
    ("nad2", "NADH dehydrogenase subunit 2"),
    ("nad3", "NADH dehydrogenase subunit 3"),
    ("nad4", "NADH dehydrogenase subunit 4"),
    ("nad4l", "NADH dehydrogenase subunit 4L"),
    ("nad5", "NADH dehydrogenase subunit 5"),
    ("nad6", "NADH dehydrogenase subunit 6"),
    ("nd1", "NADH dehydrogenase subunit 1"),
    ("nd2", "NADH dehydrogenase subunit 2"),
    ("nd3", "NADH dehydrogenase subunit 3"),
    ("nd4", "NADH dehydrogenase subunit 4"),
    ("nd4l", "NADH dehydrogenase subunit 4L"),
    ("nd5", "NADH dehydrogenase subunit 5"),
    ("nd6", "NADH dehydrogenase subunit 6"),
    ("cox1", "cytochrome c oxidase subunit I"),
    ("cox2", "cytochrome c oxidase subunit II"),
    ("cox3", "cytochrome c oxidase subunit III"),
    ("atp6", "ATP synthase F0 subunit 6"),
    ("atp8", "ATP synthase F0 subunit 8"),
    ("cob", "cytochrome b"),
    ("cytb", "cytochrome b"),
    ("cox1-a", "cytochrome c oxidase subunit I, copy A"),
    ("cox1-b", "cytochrome c oxidase subunit I, copy B"),
    ("cox1-c", "cytochrome c oxidase subunit I, copy C"),
    ("cox2-a", "cytochrome c oxidase subunit II, copy A"),
    ("cox2-b", "cytochrome c oxidase subunit II, copy B"),
    ("cox3-a", "cytochrome c oxidase subunit III, copy A"),
    ("cox3-b", "cytochrome c oxidase subunit III, copy B"),
];

static COX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^cox\d+(-[a-z])?$").expect("COX pattern is valid"));
static NAD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^nad\d+(_\d+)?$").expect("NAD pattern is valid"));
static ND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^nd\d+(_\d+)?$").expect("ND pattern is valid"));
static ORF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^orf\d+$").expect("ORF pattern is valid"));
static NAD_COPY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^((?:nad|nd)\d+)_(\d+)$").expect("NAD copy pattern is valid")
});
static COX_COPY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(cox\d+)-([a-z])$").expect("COX copy pattern is valid"));

pub(crate) fn can_handle(name: &str) -> bool {
    let name = name.to_ascii_lowercase();
    KNOWN_GENES.contains(&name.as_str())
        || COX.is_match(&name)
        || NAD.is_match(&name)
        || ND.is_match(&name)
        || name.starts_with("gp")
        || ORF.is_match(&name)
}

fn known_product(name: &str) -> Option<&'static str> {
    PRODUCTS
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, product)| *product)
}

/// Returns the product of a protein coding gene
///
/// `lookup` is the lowercase, standardized gene name, `raw` the name as
/// it was provided. Unknown genes are named after `raw`.
pub(crate) fn product(lookup: &str, raw: &str) -> String {
    if let Some(product) = known_product(lookup) {
        return product.to_string();
    }

    if let Some(caps) = NAD_COPY.captures(lookup) {
        if let Some(base) = known_product(&caps[1]) {
            return format!("{}, copy {}", base, &caps[2]);
        }
    }

    if let Some(caps) = COX_COPY.captures(lookup) {
        if let Some(base) = known_product(&caps[1]) {
            return format!("{}, copy {}", base, caps[2].to_uppercase());
        }
    }

    if lookup.starts_with("gp") {
        return format!("gene product {}", raw.get(2..).unwrap_or_default());
    }

    if ORF.is_match(lookup) {
        return "hypothetical protein".to_string();
    }

    format!("mitochondrial protein {}", raw)
}
