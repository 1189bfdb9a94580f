// Append-only store of finished games, one CSV record per line:
//
//   <outcome code>,"<x>, <y>","<x>, <y>",...
//
// Outcome codes are those of `GameStatus::code`. Each move field holds a
// comma, so it is double-quoted the usual CSV way.
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::board::{Column, GameStatus};
use crate::error::LogError;

pub const DEFAULT_LOG_PATH: &str = "log.csv";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    pub outcome: GameStatus,
    pub moves: Vec<Column>,
}

impl GameRecord {
    /// The record as one CSV line, without the line terminator.
    pub fn to_line(&self) -> String {
        let mut line = self.outcome.code().to_string();
        for m in &self.moves {
            line.push(',');
            line.push_str(&quote_field(&m.to_string()));
        }
        line
    }

    pub fn parse_line(line: &str) -> Result<Self, String> {
        let fields = split_fields(line)?;
        let mut it = fields.into_iter();
        let head = it.next().unwrap_or_default();
        let code: i8 = head.trim().parse().map_err(|_| format!("bad outcome field {:?}", head))?;
        let outcome = GameStatus::from_code(code).ok_or_else(|| format!("unknown outcome code {}", code))?;
        let moves = it
            .map(|f| f.parse::<Column>().map_err(|e| format!("bad move field {:?}: {}", f, e)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(GameRecord { outcome, moves })
    }
}

fn quote_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn split_fields(line: &str) -> Result<Vec<String>, String> {
    let mut fields = Vec::new();
    let mut cur = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    cur.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' if cur.is_empty() => in_quotes = true,
            ',' if !in_quotes => fields.push(std::mem::take(&mut cur)),
            _ => cur.push(c),
        }
    }
    if in_quotes {
        return Err("unterminated quoted field".to_string());
    }
    fields.push(cur);
    Ok(fields)
}

/// File-backed move log. The location is always explicit.
#[derive(Debug, Clone)]
pub struct MoveLogStore {
    path: PathBuf,
}

impl MoveLogStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_err(&self, source: std::io::Error) -> LogError {
        LogError::Io { path: self.path.clone(), source }
    }

    /// Appends one finished game. The whole line goes out in a single write.
    pub fn record_game(&self, record: &GameRecord) -> Result<(), LogError> {
        let mut line = record.to_line();
        line.push('\n');
        let mut f = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.io_err(e))?;
        f.write_all(line.as_bytes()).map_err(|e| self.io_err(e))?;
        debug!("appended game ({} moves, {}) to {}", record.moves.len(), record.outcome, self.path.display());
        Ok(())
    }

    pub fn record_moves(&self, moves: &[Column], outcome: GameStatus) -> Result<(), LogError> {
        self.record_game(&GameRecord { outcome, moves: moves.to_vec() })
    }

    /// Every stored game in file order. A missing file reads as no games.
    pub fn read_all_games(&self) -> Result<Vec<GameRecord>, LogError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(t) => t,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.io_err(e)),
        };
        let mut games = Vec::new();
        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim_end_matches('\r');
            if line.trim().is_empty() {
                continue;
            }
            let rec = GameRecord::parse_line(line).map_err(|reason| LogError::Parse { line: idx + 1, reason })?;
            games.push(rec);
        }
        info!("read {} games from {}", games.len(), self.path.display());
        Ok(games)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Player;

    #[test]
    fn test_line_matches_reference_quoting() {
        let rec = GameRecord {
            outcome: GameStatus::Won(Player::Two),
            moves: vec![Column { x: 0, y: 0 }, Column { x: 3, y: 1 }],
        };
        assert_eq!(rec.to_line(), r#"1,"0, 0","3, 1""#);
    }

    #[test]
    fn test_parse_accepts_unquoted_and_escaped_fields() {
        let rec = GameRecord::parse_line(r#"-2,"1, 2",A4"#).unwrap();
        assert_eq!(rec.outcome, GameStatus::Draw);
        assert_eq!(rec.moves, vec![Column { x: 1, y: 2 }, Column { x: 0, y: 3 }]);
        assert_eq!(split_fields(r#""a""b",c"#).unwrap(), vec!["a\"b".to_string(), "c".to_string()]);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(GameRecord::parse_line("9").is_err());
        assert!(GameRecord::parse_line(r#"0,"1, 2"#).is_err());
        assert!(GameRecord::parse_line(r#"0,"7, 7""#).is_err());
        assert!(GameRecord::parse_line("win").is_err());
    }

    #[test]
    fn test_outcome_only_record() {
        let rec = GameRecord { outcome: GameStatus::InProgress, moves: vec![] };
        assert_eq!(rec.to_line(), "-1");
        assert_eq!(GameRecord::parse_line("-1").unwrap(), rec);
    }
}
