// Copyright 2026 The tagsoup Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Named character reference tables.
//!
//! Two subsets: the legacy ("base") names, which the HTML standard allows
//! to resolve even without a terminating semicolon, and the extended names,
//! which require one. A reference resolves to one or two code points.

use phf::phf_map;

/// Legacy entities. These match with or without a trailing `;`.
static BASE: phf::Map<&'static str, u32> = phf_map! {
    "AElig" => 0xC6, "AMP" => 0x26, "Aacute" => 0xC1, "Acirc" => 0xC2,
    "Agrave" => 0xC0, "Aring" => 0xC5, "Atilde" => 0xC3, "Auml" => 0xC4,
    "COPY" => 0xA9, "Ccedil" => 0xC7, "ETH" => 0xD0, "Eacute" => 0xC9,
    "Ecirc" => 0xCA, "Egrave" => 0xC8, "Euml" => 0xCB, "GT" => 0x3E,
    "Iacute" => 0xCD, "Icirc" => 0xCE, "Igrave" => 0xCC, "Iuml" => 0xCF,
    "LT" => 0x3C, "Ntilde" => 0xD1, "Oacute" => 0xD3, "Ocirc" => 0xD4,
    "Ograve" => 0xD2, "Oslash" => 0xD8, "Otilde" => 0xD5, "Ouml" => 0xD6,
    "QUOT" => 0x22, "REG" => 0xAE, "THORN" => 0xDE, "Uacute" => 0xDA,
    "Ucirc" => 0xDB, "Ugrave" => 0xD9, "Uuml" => 0xDC, "Yacute" => 0xDD,
    "aacute" => 0xE1, "acirc" => 0xE2, "acute" => 0xB4, "aelig" => 0xE6,
    "agrave" => 0xE0, "amp" => 0x26, "aring" => 0xE5, "atilde" => 0xE3,
    "auml" => 0xE4, "brvbar" => 0xA6, "ccedil" => 0xE7, "cedil" => 0xB8,
    "cent" => 0xA2, "copy" => 0xA9, "curren" => 0xA4, "deg" => 0xB0,
    "divide" => 0xF7, "eacute" => 0xE9, "ecirc" => 0xEA, "egrave" => 0xE8,
    "eth" => 0xF0, "euml" => 0xEB, "frac12" => 0xBD, "frac14" => 0xBC,
    "frac34" => 0xBE, "gt" => 0x3E, "iacute" => 0xED, "icirc" => 0xEE,
    "iexcl" => 0xA1, "igrave" => 0xEC, "iquest" => 0xBF, "iuml" => 0xEF,
    "laquo" => 0xAB, "lt" => 0x3C, "macr" => 0xAF, "micro" => 0xB5,
    "middot" => 0xB7, "nbsp" => 0xA0, "not" => 0xAC, "ntilde" => 0xF1,
    "oacute" => 0xF3, "ocirc" => 0xF4, "ograve" => 0xF2, "ordf" => 0xAA,
    "ordm" => 0xBA, "oslash" => 0xF8, "otilde" => 0xF5, "ouml" => 0xF6,
    "para" => 0xB6, "plusmn" => 0xB1, "pound" => 0xA3, "quot" => 0x22,
    "raquo" => 0xBB, "reg" => 0xAE, "sect" => 0xA7, "shy" => 0xAD,
    "sup1" => 0xB9, "sup2" => 0xB2, "sup3" => 0xB3, "szlig" => 0xDF,
    "thorn" => 0xFE, "times" => 0xD7, "uacute" => 0xFA, "ucirc" => 0xFB,
    "ugrave" => 0xF9, "uml" => 0xA8, "uuml" => 0xFC, "yacute" => 0xFD,
    "yen" => 0xA5, "yuml" => 0xFF,
};

/// Extended entities; a terminating `;` is required for these to match.
/// A zero in the second slot means the reference is a single code point.
static EXTENDED: phf::Map<&'static str, [u32; 2]> = phf_map! {
    "apos" => [0x27, 0], "OElig" => [0x152, 0], "oelig" => [0x153, 0],
    "Scaron" => [0x160, 0], "scaron" => [0x161, 0], "Yuml" => [0x178, 0],
    "fnof" => [0x192, 0], "circ" => [0x2C6, 0], "tilde" => [0x2DC, 0],
    "Alpha" => [0x391, 0], "Beta" => [0x392, 0], "Gamma" => [0x393, 0],
    "Delta" => [0x394, 0], "Epsilon" => [0x395, 0], "Zeta" => [0x396, 0],
    "Eta" => [0x397, 0], "Theta" => [0x398, 0], "Iota" => [0x399, 0],
    "Kappa" => [0x39A, 0], "Lambda" => [0x39B, 0], "Mu" => [0x39C, 0],
    "Nu" => [0x39D, 0], "Xi" => [0x39E, 0], "Omicron" => [0x39F, 0],
    "Pi" => [0x3A0, 0], "Rho" => [0x3A1, 0], "Sigma" => [0x3A3, 0],
    "Tau" => [0x3A4, 0], "Upsilon" => [0x3A5, 0], "Phi" => [0x3A6, 0],
    "Chi" => [0x3A7, 0], "Psi" => [0x3A8, 0], "Omega" => [0x3A9, 0],
    "alpha" => [0x3B1, 0], "beta" => [0x3B2, 0], "gamma" => [0x3B3, 0],
    "delta" => [0x3B4, 0], "epsilon" => [0x3B5, 0], "zeta" => [0x3B6, 0],
    "eta" => [0x3B7, 0], "theta" => [0x3B8, 0], "iota" => [0x3B9, 0],
    "kappa" => [0x3BA, 0], "lambda" => [0x3BB, 0], "mu" => [0x3BC, 0],
    "nu" => [0x3BD, 0], "xi" => [0x3BE, 0], "omicron" => [0x3BF, 0],
    "pi" => [0x3C0, 0], "rho" => [0x3C1, 0], "sigmaf" => [0x3C2, 0],
    "sigma" => [0x3C3, 0], "tau" => [0x3C4, 0], "upsilon" => [0x3C5, 0],
    "phi" => [0x3C6, 0], "chi" => [0x3C7, 0], "psi" => [0x3C8, 0],
    "omega" => [0x3C9, 0], "thetasym" => [0x3D1, 0], "upsih" => [0x3D2, 0],
    "piv" => [0x3D6, 0],
    "ensp" => [0x2002, 0], "emsp" => [0x2003, 0], "thinsp" => [0x2009, 0],
    "zwnj" => [0x200C, 0], "zwj" => [0x200D, 0], "lrm" => [0x200E, 0],
    "rlm" => [0x200F, 0], "ndash" => [0x2013, 0], "mdash" => [0x2014, 0],
    "lsquo" => [0x2018, 0], "rsquo" => [0x2019, 0], "sbquo" => [0x201A, 0],
    "ldquo" => [0x201C, 0], "rdquo" => [0x201D, 0], "bdquo" => [0x201E, 0],
    "dagger" => [0x2020, 0], "Dagger" => [0x2021, 0], "bull" => [0x2022, 0],
    "hellip" => [0x2026, 0], "permil" => [0x2030, 0], "prime" => [0x2032, 0],
    "Prime" => [0x2033, 0], "lsaquo" => [0x2039, 0], "rsaquo" => [0x203A, 0],
    "oline" => [0x203E, 0], "frasl" => [0x2044, 0], "euro" => [0x20AC, 0],
    "alefsym" => [0x2135, 0], "trade" => [0x2122, 0],
    "larr" => [0x2190, 0], "uarr" => [0x2191, 0], "rarr" => [0x2192, 0],
    "darr" => [0x2193, 0], "harr" => [0x2194, 0], "crarr" => [0x21B5, 0],
    "lArr" => [0x21D0, 0], "uArr" => [0x21D1, 0], "rArr" => [0x21D2, 0],
    "dArr" => [0x21D3, 0], "hArr" => [0x21D4, 0],
    "forall" => [0x2200, 0], "part" => [0x2202, 0], "exist" => [0x2203, 0],
    "empty" => [0x2205, 0], "nabla" => [0x2207, 0], "isin" => [0x2208, 0],
    "notin" => [0x2209, 0], "ni" => [0x220B, 0], "prod" => [0x220F, 0],
    "sum" => [0x2211, 0], "minus" => [0x2212, 0], "lowast" => [0x2217, 0],
    "radic" => [0x221A, 0], "prop" => [0x221D, 0], "infin" => [0x221E, 0],
    "ang" => [0x2220, 0], "and" => [0x2227, 0], "or" => [0x2228, 0],
    "cap" => [0x2229, 0], "cup" => [0x222A, 0], "int" => [0x222B, 0],
    "there4" => [0x2234, 0], "sim" => [0x223C, 0], "cong" => [0x2245, 0],
    "asymp" => [0x2248, 0], "ne" => [0x2260, 0], "equiv" => [0x2261, 0],
    "le" => [0x2264, 0], "ge" => [0x2265, 0], "sub" => [0x2282, 0],
    "sup" => [0x2283, 0], "nsub" => [0x2284, 0], "sube" => [0x2286, 0],
    "supe" => [0x2287, 0], "oplus" => [0x2295, 0], "otimes" => [0x2297, 0],
    "perp" => [0x22A5, 0], "sdot" => [0x22C5, 0],
    "lceil" => [0x2308, 0], "rceil" => [0x2309, 0], "lfloor" => [0x230A, 0],
    "rfloor" => [0x230B, 0], "lang" => [0x27E8, 0], "rang" => [0x27E9, 0],
    "loz" => [0x25CA, 0], "spades" => [0x2660, 0], "clubs" => [0x2663, 0],
    "hearts" => [0x2665, 0], "diams" => [0x2666, 0],
    // Two-code-point references.
    "fjlig" => [0x66, 0x6A], "NotEqualTilde" => [0x2242, 0x338],
    "ThickSpace" => [0x205F, 0x200A],
};

/// Is `name` a legacy entity, valid even without a trailing semicolon?
pub fn is_base_named_entity(name: &str) -> bool {
    BASE.contains_key(name)
}

/// Is `name` any recognized entity (legacy or extended)?
pub fn is_named_entity(name: &str) -> bool {
    BASE.contains_key(name) || EXTENDED.contains_key(name)
}

/// The code points `name` denotes; the second slot is zero for
/// single-code-point references.
pub fn codepoints_for_name(name: &str) -> Option<[u32; 2]> {
    if let Some(&cp) = BASE.get(name) {
        return Some([cp, 0]);
    }
    EXTENDED.get(name).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_lookup() {
        assert!(is_base_named_entity("amp"));
        assert!(is_base_named_entity("AMP"));
        assert!(!is_base_named_entity("Amp"));
        assert_eq!(codepoints_for_name("amp"), Some([0x26, 0]));
        assert_eq!(codepoints_for_name("nbsp"), Some([0xA0, 0]));
    }

    #[test]
    fn extended_lookup() {
        assert!(!is_base_named_entity("rarr"));
        assert!(is_named_entity("rarr"));
        assert_eq!(codepoints_for_name("rarr"), Some([0x2192, 0]));
        assert_eq!(codepoints_for_name("fjlig"), Some([0x66, 0x6A]));
    }

    #[test]
    fn unknown_name() {
        assert!(!is_named_entity("foo"));
        assert_eq!(codepoints_for_name("foo"), None);
    }
}
