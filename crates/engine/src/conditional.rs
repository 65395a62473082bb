//! MSO / IE conditional comment helpers.
//!
//! Outlook on Windows and old IE render the content of
//! `<!--[if mso | IE]>…<![endif]-->` comments; every other client skips
//! it. The reverse guard `<!--[if !mso]><!--> … <!--<![endif]-->` hides
//! content *from* Outlook. Several emission patterns span sibling tags
//! (one comment opens a `<td>` that a later comment closes); those live
//! with the section/group/wrapper components — this module only owns the
//! delimiters and the single-fragment helpers.

/// Opens an Outlook-only region.
pub const MSO_IF: &str = "<!--[if mso | IE]>";
/// Closes a conditional region.
pub const END_IF: &str = "<![endif]-->";
/// Opens an everything-but-Outlook region.
pub const NOT_MSO_IF: &str = "<!--[if !mso]><!-->";
/// Closes an everything-but-Outlook region.
pub const NOT_MSO_END: &str = "<!--<![endif]-->";
/// Opens a region for Outlook using Word rendering (2007–2013).
pub const LTE_MSO_11_IF: &str = "<!--[if lte mso 11]>";

/// Writes `inner` wrapped in an Outlook-only conditional.
pub fn mso(out: &mut String, inner: &str) {
    out.push_str(MSO_IF);
    out.push_str(inner);
    out.push_str(END_IF);
}

/// Writes `inner` wrapped in an everything-but-Outlook conditional.
pub fn not_mso(out: &mut String, inner: &str) {
    out.push_str(NOT_MSO_IF);
    out.push_str(inner);
    out.push_str(NOT_MSO_END);
}
