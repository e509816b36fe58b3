// src/core/sanitize.rs

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Upper-case a letter unless another letter precedes it; lower-case it otherwise.
/// "l-methylfolate" → "L-Methylfolate", "ORTHO EVRA" → "Ortho Evra".
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_letter = false;
    for ch in s.chars() {
        if ch.is_alphabetic() {
            if prev_letter { out.extend(ch.to_lowercase()); }
            else { out.extend(ch.to_uppercase()); }
            prev_letter = true;
        } else {
            out.push(ch);
            prev_letter = false;
        }
    }
    out
}

/// Canonical drug name used for filtering, merging and page lookups.
pub fn normalize_drug_name(name: &str) -> String {
    title_case(&normalize_ws(name))
}

/// Page slug: the normalized name, lower-cased. Spaces and punctuation are kept.
pub fn slug(name: &str) -> String {
    normalize_drug_name(name).to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_case_variants() {
        assert_eq!(title_case("valsartan"), "Valsartan");
        assert_eq!(title_case("ORTHO EVRA"), "Ortho Evra");
        assert_eq!(title_case("l-methylfolate"), "L-Methylfolate");
        assert_eq!(title_case("ethinyl estradiol / norgestimate"), "Ethinyl Estradiol / Norgestimate");
        assert_eq!(title_case("b12"), "B12");
        assert_eq!(title_case("3d"), "3D");
    }

    #[test]
    fn normalize_collapses_whitespace() {
        assert_eq!(normalize_drug_name("  buprenorphine   /  naloxone "), "Buprenorphine / Naloxone");
        assert_eq!(normalize_ws("a\t\n b"), "a b");
    }

    #[test]
    fn slug_is_lowercase_and_unencoded() {
        assert_eq!(slug("Valsartan"), "valsartan");
        assert_eq!(slug("ortho evra"), "ortho evra");
    }
}
