//! Startup banner: figlet title shaded from chalk blue to board green, one
//! color per row.

use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use figlet_rs::FIGfont;
use std::io::{self, Write, stdout};

const TITLE: &str = "LESSON-SYNC";
const CHALK_BLUE: [u8; 3] = [0x3b, 0x82, 0xf6];
const BOARD_GREEN: [u8; 3] = [0x22, 0xc5, 0x5e];

fn rgb([r, g, b]: [u8; 3]) -> Color {
    Color::Rgb { r, g, b }
}

/// Color of row `row` out of `rows`, stepping each channel evenly from
/// `CHALK_BLUE` (first row) to `BOARD_GREEN` (last row).
fn row_shade(row: usize, rows: usize) -> [u8; 3] {
    let span = rows.saturating_sub(1).max(1) as i32;
    let step = row.min(span as usize) as i32;
    let mut shade = [0u8; 3];
    for (out, (from, to)) in shade
        .iter_mut()
        .zip(CHALK_BLUE.iter().zip(BOARD_GREEN.iter()))
    {
        let delta = i32::from(*to) - i32::from(*from);
        *out = (i32::from(*from) + delta * step / span) as u8;
    }
    shade
}

fn render(out: &mut impl Write) -> io::Result<()> {
    let art = FIGfont::standard()
        .ok()
        .and_then(|font| font.convert(TITLE).map(|f| f.to_string()))
        .unwrap_or_else(|| TITLE.to_string());
    let rows: Vec<&str> = art.lines().filter(|l| !l.trim().is_empty()).collect();

    for (i, row) in rows.iter().enumerate() {
        queue!(
            out,
            SetForegroundColor(rgb(row_shade(i, rows.len()))),
            Print(row),
            Print("\r\n")
        )?;
    }
    queue!(
        out,
        SetForegroundColor(rgb(BOARD_GREEN)),
        Print(format!(
            "v{}  attendance & kazanım\r\n",
            env!("CARGO_PKG_VERSION")
        )),
        ResetColor
    )?;
    out.flush()
}

/// Print the banner. Terminal write errors are ignored.
pub fn print_welcome() {
    let _ = render(&mut stdout().lock());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_shade_endpoints() {
        assert_eq!(row_shade(0, 6), CHALK_BLUE);
        assert_eq!(row_shade(5, 6), BOARD_GREEN);
        assert_eq!(row_shade(0, 1), CHALK_BLUE);
    }

    #[test]
    fn test_render_writes_title_rows() {
        let mut buf = Vec::new();
        render(&mut buf).unwrap();
        let text = String::from_utf8_lossy(&buf);
        assert!(text.contains("attendance & kazanım"));
        assert!(text.lines().count() > 1);
    }
}
