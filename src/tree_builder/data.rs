// Copyright 2026 The tagsoup Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Doctype analysis: which doctypes flip the document into quirks or
//! limited-quirks mode.

use crate::interface::QuirksMode::{self, LimitedQuirks, NoQuirks, Quirks};
use crate::tokenizer::Doctype;

// These are all lowercase, for ASCII-case-insensitive matching.
static QUIRKY_PUBLIC_PREFIXES: &[&str] = &[
    "-//advasoft ltd//dtd html 3.0 aswedit + extensions//",
    "-//as//dtd html 3.0 aswedit + extensions//",
    "-//ietf//dtd html 2.0 level 1//",
    "-//ietf//dtd html 2.0 level 2//",
    "-//ietf//dtd html 2.0 strict level 1//",
    "-//ietf//dtd html 2.0 strict level 2//",
    "-//ietf//dtd html 2.0 strict//",
    "-//ietf//dtd html 2.0//",
    "-//ietf//dtd html 2.1e//",
    "-//ietf//dtd html 3.0//",
    "-//ietf//dtd html 3.2 final//",
    "-//ietf//dtd html 3.2//",
    "-//ietf//dtd html 3//",
    "-//ietf//dtd html level 0//",
    "-//ietf//dtd html level 1//",
    "-//ietf//dtd html level 2//",
    "-//ietf//dtd html level 3//",
    "-//ietf//dtd html strict level 0//",
    "-//ietf//dtd html strict level 1//",
    "-//ietf//dtd html strict level 2//",
    "-//ietf//dtd html strict level 3//",
    "-//ietf//dtd html strict//",
    "-//ietf//dtd html//",
    "-//metrius//dtd metrius presentational//",
    "-//microsoft//dtd internet explorer 2.0 html strict//",
    "-//microsoft//dtd internet explorer 2.0 html//",
    "-//microsoft//dtd internet explorer 2.0 tables//",
    "-//microsoft//dtd internet explorer 3.0 html strict//",
    "-//microsoft//dtd internet explorer 3.0 html//",
    "-//microsoft//dtd internet explorer 3.0 tables//",
    "-//netscape comm. corp.//dtd html//",
    "-//netscape comm. corp.//dtd strict html//",
    "-//o'reilly and associates//dtd html 2.0//",
    "-//o'reilly and associates//dtd html extended 1.0//",
    "-//o'reilly and associates//dtd html extended relaxed 1.0//",
    "-//softquad software//dtd hotmetal pro 6.0::19990601::extensions to html 4.0//",
    "-//softquad//dtd hotmetal pro 4.0::19971010::extensions to html 4.0//",
    "-//spyglass//dtd html 2.0 extended//",
    "-//sq//dtd html 2.0 hotmetal + extensions//",
    "-//sun microsystems corp.//dtd hotjava html//",
    "-//sun microsystems corp.//dtd hotjava strict html//",
    "-//w3c//dtd html 3 1995-03-24//",
    "-//w3c//dtd html 3.2 draft//",
    "-//w3c//dtd html 3.2 final//",
    "-//w3c//dtd html 3.2//",
    "-//w3c//dtd html 3.2s draft//",
    "-//w3c//dtd html 4.0 frameset//",
    "-//w3c//dtd html 4.0 transitional//",
    "-//w3c//dtd html experimental 19960712//",
    "-//w3c//dtd html experimental 970421//",
    "-//w3c//dtd w3 html//",
    "-//w3o//dtd w3 html 3.0//",
    "-//webtechs//dtd mozilla html 2.0//",
    "-//webtechs//dtd mozilla html//",
];

static QUIRKY_PUBLIC_MATCHES: &[&str] = &[
    "-//w3o//dtd w3 html strict 3.0//en//",
    "-/w3c/dtd html 4.0 transitional/en",
    "html",
];

static QUIRKY_SYSTEM_MATCHES: &[&str] =
    &["http://www.ibm.com/data/dtd/v11/ibmxhtml1-transitional.dtd"];

static LIMITED_QUIRKY_PUBLIC_PREFIXES: &[&str] = &[
    "-//w3c//dtd xhtml 1.0 frameset//",
    "-//w3c//dtd xhtml 1.0 transitional//",
];

static HTML4_PUBLIC_PREFIXES: &[&str] = &[
    "-//w3c//dtd html 4.01 frameset//",
    "-//w3c//dtd html 4.01 transitional//",
];

fn contains_ignore_case(haystack: &[&str], needle: &str) -> bool {
    haystack.iter().any(|x| needle.eq_ignore_ascii_case(x))
}

fn contains_prefix_ignore_case(haystack: &[&str], needle: &str) -> bool {
    haystack.iter().any(|x| {
        needle.len() >= x.len()
            && needle.as_bytes()[..x.len()].eq_ignore_ascii_case(x.as_bytes())
    })
}

/// Decide whether a doctype is an error, and which quirks mode it selects.
pub fn doctype_error_and_quirks(doctype: &Doctype) -> (bool, QuirksMode) {
    fn opt_eq(value: &Option<tendril::StrTendril>, expected: &str) -> bool {
        match value {
            Some(x) => &**x == expected,
            None => expected.is_empty(),
        }
    }

    fn is_doctype_ok(doctype: &Doctype) -> bool {
        let public = &doctype.public_id;
        let system = &doctype.system_id;
        let has_system_id = system.is_some();

        if !opt_eq(&doctype.name, "html") {
            false
        } else if public.is_none() {
            !has_system_id || opt_eq(system, "about:legacy-compat")
        } else if opt_eq(public, "-//W3C//DTD HTML 4.0//EN") {
            !has_system_id || opt_eq(system, "http://www.w3.org/TR/REC-html40/strict.dtd")
        } else if opt_eq(public, "-//W3C//DTD HTML 4.01//EN") {
            !has_system_id || opt_eq(system, "http://www.w3.org/TR/html4/strict.dtd")
        } else if opt_eq(public, "-//W3C//DTD XHTML 1.0 Strict//EN") {
            opt_eq(system, "http://www.w3.org/TR/xhtml1/DTD/xhtml1-strict.dtd")
        } else if opt_eq(public, "-//W3C//DTD XHTML 1.1//EN") {
            opt_eq(system, "http://www.w3.org/TR/xhtml11/DTD/xhtml11.dtd")
        } else {
            false
        }
    }

    let err = !is_doctype_ok(doctype);

    let public = doctype.public_id.as_deref();
    let system = doctype.system_id.as_deref();

    let quirk = if doctype.force_quirks || !opt_eq(&doctype.name, "html") {
        Quirks
    } else if matches!(public, Some(p) if contains_ignore_case(QUIRKY_PUBLIC_MATCHES, p)) {
        Quirks
    } else if matches!(system, Some(s) if contains_ignore_case(QUIRKY_SYSTEM_MATCHES, s)) {
        Quirks
    } else if matches!(public, Some(p) if contains_prefix_ignore_case(QUIRKY_PUBLIC_PREFIXES, p)) {
        Quirks
    } else if matches!(public, Some(p) if contains_prefix_ignore_case(LIMITED_QUIRKY_PUBLIC_PREFIXES, p))
    {
        LimitedQuirks
    } else if matches!(public, Some(p) if contains_prefix_ignore_case(HTML4_PUBLIC_PREFIXES, p)) {
        if system.is_none() {
            Quirks
        } else {
            LimitedQuirks
        }
    } else {
        NoQuirks
    };

    (err, quirk)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tendril::StrTendril;

    fn doctype(name: &str, public: Option<&str>, system: Option<&str>) -> Doctype {
        Doctype {
            name: Some(StrTendril::from(name)),
            public_id: public.map(StrTendril::from),
            system_id: system.map(StrTendril::from),
            force_quirks: false,
        }
    }

    #[test]
    fn modern_doctype_is_ok() {
        let (err, quirks) = doctype_error_and_quirks(&doctype("html", None, None));
        assert!(!err);
        assert_eq!(quirks, NoQuirks);
    }

    #[test]
    fn html_3_2_is_quirky() {
        let d = doctype("html", Some("-//W3C//DTD HTML 3.2 Final//EN"), None);
        let (err, quirks) = doctype_error_and_quirks(&d);
        assert!(err);
        assert_eq!(quirks, Quirks);
    }

    #[test]
    fn xhtml_transitional_is_limited_quirks() {
        let d = doctype(
            "html",
            Some("-//W3C//DTD XHTML 1.0 Transitional//EN"),
            Some("http://www.w3.org/TR/xhtml1/DTD/xhtml1-transitional.dtd"),
        );
        assert_eq!(doctype_error_and_quirks(&d).1, LimitedQuirks);
    }

    #[test]
    fn force_quirks_wins() {
        let mut d = doctype("html", None, None);
        d.force_quirks = true;
        assert_eq!(doctype_error_and_quirks(&d).1, Quirks);
    }
}
