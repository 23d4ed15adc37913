use std::fmt::{self, Write as _};

use blockfall_engine::{Color, EngineSnapshot};

const fn cell_symbol(color: Option<Color>) -> char {
    match color {
        None => '.',
        Some(Color::Cyan) => 'C',
        Some(Color::Yellow) => 'Y',
        Some(Color::Purple) => 'P',
        Some(Color::Green) => 'G',
        Some(Color::Red) => 'R',
        Some(Color::Blue) => 'B',
        Some(Color::Orange) => 'O',
    }
}

/// Text rendering of a snapshot: the board framed by walls, with the score
/// and next piece beside it.
#[derive(Debug)]
pub struct BoardDisplay<'a> {
    snapshot: &'a EngineSnapshot,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(snapshot: &'a EngineSnapshot) -> Self {
        Self { snapshot }
    }

    fn side_panel(&self) -> Vec<String> {
        let snapshot = self.snapshot;
        let mut lines = vec![
            format!("Score: {}", snapshot.score),
            format!("Lines: {}", snapshot.stats.total_cleared_lines()),
            format!("Pieces: {}", snapshot.stats.completed_pieces()),
            String::new(),
            format!("Next: {}", snapshot.next.kind().as_char()),
        ];
        let next = snapshot.next.shape();
        let symbol = cell_symbol(Some(snapshot.next.color()));
        for y in 0..next.rows() {
            let mut line = String::from("  ");
            for x in 0..next.cols() {
                line.push(if next.is_filled(x, y) { symbol } else { ' ' });
            }
            lines.push(line.trim_end().to_owned());
        }
        if snapshot.game_over {
            lines.push(String::new());
            lines.push("GAME OVER".to_owned());
        }
        lines
    }
}

impl fmt::Display for BoardDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.snapshot;
        let panel = self.side_panel();
        for y in 0..snapshot.height {
            f.write_char('|')?;
            for x in 0..snapshot.width {
                f.write_char(cell_symbol(snapshot.visible_color(x, y)))?;
            }
            f.write_char('|')?;
            if let Some(line) = panel.get(y).filter(|line| !line.is_empty()) {
                write!(f, "  {line}")?;
            }
            writeln!(f)?;
        }
        writeln!(f, "+{}+", "-".repeat(snapshot.width))?;
        for line in panel.iter().skip(snapshot.height) {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

pub fn render(snapshot: &EngineSnapshot) -> String {
    BoardDisplay::new(snapshot).to_string()
}
