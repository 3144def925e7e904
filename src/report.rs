//! Printing of results.

use std::io::{self, Write};
use termcolor::{Color, ColorSpec, WriteColor};

use crate::extract::{CallSite, Variant};
use crate::options::OutputFormat;

fn variant_color(variant: Variant) -> Option<Color> {
    match variant {
        Variant::Error => Some(Color::Red),
        Variant::Warning => Some(Color::Yellow),
        Variant::Success => Some(Color::Green),
        Variant::Info | Variant::Loading => Some(Color::Cyan),
        Variant::Default | Variant::Custom | Variant::Message => None,
    }
}

/// Write `sites` to `out` in `format`. `identifier` names the function in the text header.
pub fn report<W: WriteColor>(
    out: &mut W,
    identifier: &str,
    sites: &[CallSite],
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Text => write_text(out, identifier, sites),
        OutputFormat::Json => write_json(out, sites),
    }
}

fn write_text<W: WriteColor>(out: &mut W, identifier: &str, sites: &[CallSite]) -> io::Result<()> {
    writeln!(out, "Found {} {} instances.", sites.len(), identifier)?;
    for site in sites {
        let tag = format!("[{}]", site.variant.as_str().to_uppercase());
        match variant_color(site.variant) {
            Some(color) => {
                out.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
                write!(out, "{}", tag)?;
                out.reset()?;
            }
            None => write!(out, "{}", tag)?,
        }
        writeln!(
            out,
            " {}:{} - {}",
            site.file.display(),
            site.line,
            site.args_summary
        )?;
    }
    Ok(())
}

fn write_json<W: Write>(out: &mut W, sites: &[CallSite]) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, sites)?;
    writeln!(out)
}
