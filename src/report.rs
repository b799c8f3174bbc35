//! Fixed-width text layout shared by the timer reports.

use std::fmt::{self, Display, Write};

/// Width of the left-aligned label column in `SingleTimer` reports.
pub const LABEL_WIDTH: usize = 18;

/// Width of the right-aligned value column in `SingleTimer` reports.
pub const VALUE_WIDTH: usize = 10;

/// `<label padded to 18> : <value right-aligned to 10>`
pub(crate) fn field<W: Write, V: Display>(w: &mut W, label: &str, value: V) -> fmt::Result {
    writeln!(
        w,
        "{:<lw$} : {:>vw$}",
        label,
        value,
        lw = LABEL_WIDTH,
        vw = VALUE_WIDTH
    )
}

/// Same as `field`, with a real value printed to two decimals.
pub(crate) fn real_field<W: Write>(w: &mut W, label: &str, value: f64) -> fmt::Result {
    writeln!(
        w,
        "{:<lw$} : {:>vw$.2}",
        label,
        value,
        lw = LABEL_WIDTH,
        vw = VALUE_WIDTH
    )
}

/// `<label padded to 18> : <text>` with the text left as-is.
pub(crate) fn text_field<W: Write>(w: &mut W, label: &str, text: &str) -> fmt::Result {
    writeln!(w, "{:<lw$} : {}", label, text, lw = LABEL_WIDTH)
}

/// Render a report closure into a fresh `String`.
pub(crate) fn render<F>(write: F) -> String
where
    F: FnOnce(&mut String) -> fmt::Result,
{
    let mut out = String::new();
    write(&mut out).expect("writing to a String cannot fail");
    out
}
