use bevy::asset::io::Reader;
use bevy::asset::{AssetLoader, LoadContext};
use bevy::prelude::*;
use thiserror::Error;

/// Comma-separated rows exactly as they appear in a survey chart export.
/// Validation and axis remapping happen later, per row, so a malformed
/// line never fails the whole file.
#[derive(Asset, TypePath, Debug, Clone, Default, PartialEq)]
pub struct CoordinateTable {
    pub rows: Vec<Vec<String>>,
}

impl CoordinateTable {
    /// Split text into rows of unquoted fields. A trailing newline does not
    /// produce an extra row; any other blank line becomes a single empty field.
    pub fn parse(text: &str) -> Self {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let rows = text.lines().map(split_record).collect();
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Split one line on commas, honouring double-quoted fields.
fn split_record(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                // "" inside a quoted field is an escaped quote
                if chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            '"' if field.is_empty() => in_quotes = true,
            ',' if !in_quotes => fields.push(std::mem::take(&mut field)),
            _ => field.push(c),
        }
    }
    fields.push(field);

    fields
}

#[derive(Debug, Error)]
pub enum CoordinateTableError {
    #[error("could not read coordinate table: {0}")]
    Io(#[from] std::io::Error),

    #[error("coordinate table is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Loads `.csv` files into [`CoordinateTable`] assets.
#[derive(Default)]
pub struct CoordinateTableLoader;

impl AssetLoader for CoordinateTableLoader {
    type Asset = CoordinateTable;
    type Settings = ();
    type Error = CoordinateTableError;

    async fn load(
        &self,
        reader: &mut dyn Reader,
        _settings: &(),
        _load_context: &mut LoadContext<'_>,
    ) -> Result<Self::Asset, Self::Error> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).await?;
        let text = String::from_utf8(bytes)?;

        Ok(CoordinateTable::parse(&text))
    }

    fn extensions(&self) -> &[&str] {
        &["csv"]
    }
}
