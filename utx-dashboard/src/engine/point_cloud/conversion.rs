use constants::coordinate_system::transform_coordinates;
use rand::Rng;
use thiserror::Error;

/// Why a single table row was left out of the point cloud.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RowRejection {
    #[error("invalid row format at row {row}: expected 3 columns, found {found}")]
    WrongColumnCount { row: usize, found: usize },

    #[error("invalid data at row {row}: column {column} is not a number ({value:?})")]
    InvalidNumber {
        row: usize,
        column: usize,
        value: String,
    },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PointCloudError {
    #[error("no valid points found ({rejected} rows rejected)")]
    NoValidPoints { rejected: usize },
}

/// Supplies the single colour shared by every point of one cloud.
pub trait ColorSource {
    fn next_color(&mut self) -> [f32; 3];
}

/// Uniform random RGB in `[0, 1)` per channel.
#[derive(Default)]
pub struct RandomColorSource;

impl ColorSource for RandomColorSource {
    fn next_color(&mut self) -> [f32; 3] {
        let mut rng = rand::thread_rng();
        [rng.r#gen(), rng.r#gen(), rng.r#gen()]
    }
}

/// Flat position and colour buffers for one point cloud, three floats per point.
#[derive(Debug, Clone, PartialEq)]
pub struct PointCloudGeometry {
    pub positions: Vec<f32>,
    pub colors: Vec<f32>,
    pub color: [f32; 3],
}

impl PointCloudGeometry {
    pub fn point_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Positions grouped per point, as mesh attributes expect them.
    pub fn points(&self) -> Vec<[f32; 3]> {
        self.positions
            .chunks_exact(3)
            .map(|p| [p[0], p[1], p[2]])
            .collect()
    }
}

/// Result of converting a table: the geometry if any row survived, plus
/// every rejection in row order.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub geometry: Result<PointCloudGeometry, PointCloudError>,
    pub rejections: Vec<RowRejection>,
}

/// Validate one row and remap it from survey axes to scene axes.
pub fn parse_row(index: usize, row: &[String]) -> Result<[f32; 3], RowRejection> {
    if row.len() != 3 {
        return Err(RowRejection::WrongColumnCount {
            row: index,
            found: row.len(),
        });
    }

    let mut values = [0.0f32; 3];
    for (column, field) in row.iter().enumerate() {
        values[column] = parse_coordinate(field).ok_or_else(|| RowRejection::InvalidNumber {
            row: index,
            column,
            value: field.clone(),
        })?;
    }

    Ok(transform_coordinates(values[0], values[1], values[2]))
}

/// Read the longest numeric prefix of a trimmed field, so `1.0abc` reads as
/// `1.0` and `1e999` overflows to infinity. Only a field with no numeric
/// prefix at all (`NaN`, `abc`, empty) is rejected.
fn parse_coordinate(field: &str) -> Option<f32> {
    let text = field.trim();
    let bytes = text.as_bytes();

    let mut end = match bytes.first() {
        Some(b'+' | b'-') => 1,
        _ => 0,
    };

    if text[end..].starts_with("Infinity") {
        let infinity = if bytes[0] == b'-' { f32::NEG_INFINITY } else { f32::INFINITY };
        return Some(infinity);
    }

    let integer_digits = count_digits(&bytes[end..]);
    end += integer_digits;

    let mut fraction_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        fraction_digits = count_digits(&bytes[end + 1..]);
        end += 1 + fraction_digits;
    }

    if integer_digits + fraction_digits == 0 {
        return None;
    }

    // An exponent only counts when at least one digit follows it
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exponent = end + 1;
        if matches!(bytes.get(exponent), Some(b'+' | b'-')) {
            exponent += 1;
        }
        let exponent_digits = count_digits(&bytes[exponent..]);
        if exponent_digits > 0 {
            end = exponent + exponent_digits;
        }
    }

    text[..end].parse::<f32>().ok()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Convert raw rows into point cloud buffers, drawing one colour for the whole cloud.
pub fn convert_rows(rows: &[Vec<String>], colors: &mut dyn ColorSource) -> Conversion {
    let color = colors.next_color();
    let mut positions = Vec::with_capacity(rows.len() * 3);
    let mut rejections = Vec::new();

    for (index, row) in rows.iter().enumerate() {
        match parse_row(index, row) {
            Ok(point) => positions.extend_from_slice(&point),
            Err(rejection) => rejections.push(rejection),
        }
    }

    if positions.is_empty() {
        return Conversion {
            geometry: Err(PointCloudError::NoValidPoints {
                rejected: rejections.len(),
            }),
            rejections,
        };
    }

    let colors = color.repeat(positions.len() / 3);

    Conversion {
        geometry: Ok(PointCloudGeometry {
            positions,
            colors,
            color,
        }),
        rejections,
    }
}
