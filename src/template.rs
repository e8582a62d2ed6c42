// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Output path templates.  A template is a path with a printf-style
//! placeholder where the frame index goes: `%d` for the bare number,
//! `%04d` to zero-pad it, `%%` for a literal percent sign.  Templates
//! are parsed once, up front, so a bad one is caught before any frame
//! gets rendered.

use errors::RenderError;
use std::path::PathBuf;
use std::str::FromStr;

/// Widest zero-padding a placeholder may ask for.
pub const MAX_PAD_WIDTH: usize = 32;

#[derive(Clone, Debug, PartialEq)]
enum Piece {
    Text(String),
    Index(usize),
}

/// A parsed output path template.
#[derive(Clone, Debug, PartialEq)]
pub struct PathTemplate {
    pieces: Vec<Piece>,
}

impl PathTemplate {
    /// Parses `template`, rejecting any `%` sequence other than `%d`,
    /// `%Nd`, `%0Nd` or `%%`.
    pub fn parse(template: &str) -> Result<PathTemplate, RenderError> {
        let fail = |reason: &str| RenderError::Template {
            template: template.to_string(),
            reason: reason.to_string(),
        };

        let mut pieces = vec![];
        let mut text = String::new();
        let mut chars = template.chars().peekable();
        while let Some(c) = chars.next() {
            if c != '%' {
                text.push(c);
                continue;
            }
            if chars.peek() == Some(&'%') {
                chars.next();
                text.push('%');
                continue;
            }
            let mut digits = String::new();
            while let Some(&d) = chars.peek() {
                if !d.is_ascii_digit() {
                    break;
                }
                digits.push(d);
                chars.next();
            }
            match chars.next() {
                Some('d') => {}
                Some(other) => return Err(fail(&format!("unsupported conversion '%{}'", other))),
                None => return Err(fail("template ends in the middle of a placeholder")),
            }
            let width = if digits.is_empty() {
                0
            } else {
                usize::from_str(&digits).unwrap_or(usize::max_value())
            };
            if width > MAX_PAD_WIDTH {
                return Err(fail(&format!(
                    "placeholder width {} is wider than {}",
                    digits, MAX_PAD_WIDTH
                )));
            }
            if !text.is_empty() {
                pieces.push(Piece::Text(text.split_off(0)));
            }
            pieces.push(Piece::Index(width));
        }
        if !text.is_empty() {
            pieces.push(Piece::Text(text));
        }
        Ok(PathTemplate { pieces })
    }

    /// Whether the template varies with the frame index at all.  One
    /// that doesn't will have every frame overwrite the last.
    pub fn has_placeholder(&self) -> bool {
        self.pieces.iter().any(|p| match p {
            Piece::Index(_) => true,
            Piece::Text(_) => false,
        })
    }

    /// The path for frame `index`.
    pub fn render(&self, index: usize) -> PathBuf {
        let mut path = String::new();
        for piece in &self.pieces {
            match piece {
                Piece::Text(t) => path.push_str(t),
                Piece::Index(width) => path.push_str(&format!("{:0width$}", index, width = *width)),
            }
        }
        PathBuf::from(path)
    }
}

/// `mandel%d.jpg`
impl Default for PathTemplate {
    fn default() -> Self {
        PathTemplate {
            pieces: vec![
                Piece::Text("mandel".to_string()),
                Piece::Index(0),
                Piece::Text(".jpg".to_string()),
            ],
        }
    }
}

impl FromStr for PathTemplate {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PathTemplate::parse(s)
    }
}
