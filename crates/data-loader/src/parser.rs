//! Parsers for the artifact files.
//!
//! Formats (UTF-8, one record per line, blank lines skipped):
//! - places.dat: placeId::name
//! - similarity.dat: score,score,...   (one matrix row per line)
//! - city_pivot.dat: name::value,value,...
//! - links.dat: city::country::population::area_sq_mi::url
//! - model.json: {"metric": "euclidean" | "manhattan" | "cosine"}

use crate::error::{ArtifactError, Result};
use crate::neighbors::ModelDescriptor;
use crate::types::*;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Read a whole artifact file, mapping a missing file to `FileNotFound`
fn read_artifact(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ArtifactError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => ArtifactError::IoError(e),
    })
}

/// Non-empty lines with their 1-based line numbers
fn numbered_lines(content: &str) -> impl Iterator<Item = (usize, &str)> {
    content
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Pull the next `::`-separated field or report which one is missing
fn next_field<'a>(
    parts: &mut impl Iterator<Item = &'a str>,
    file: &str,
    line: usize,
    field: &str,
) -> Result<&'a str> {
    parts.next().ok_or_else(|| ArtifactError::ParseError {
        file: file.to_string(),
        line,
        reason: format!("Missing {}", field),
    })
}

/// Parse a comma-separated vector of scores
fn parse_vector(s: &str, file: &str, line: usize) -> Result<Vec<f32>> {
    if s.trim().is_empty() {
        return Ok(Vec::new());
    }
    s.split(',')
        .map(|value| {
            value.trim().parse::<f32>().map_err(|e| ArtifactError::ParseError {
                file: file.to_string(),
                line,
                reason: format!("Invalid score '{}': {}", value.trim(), e),
            })
        })
        .collect()
}

/// Parse the places.dat item list
///
/// Format: placeId::name
pub fn parse_places(path: &Path) -> Result<Vec<Place>> {
    let content = read_artifact(path)?;
    let file = file_name(path);
    let mut places = Vec::new();

    for (line_no, line) in numbered_lines(&content) {
        let mut parts = line.splitn(2, "::");

        let id = next_field(&mut parts, &file, line_no, "placeId")?;
        let name = next_field(&mut parts, &file, line_no, "name")?;

        places.push(Place {
            id: id.trim().parse().map_err(|e| ArtifactError::ParseError {
                file: file.clone(),
                line: line_no,
                reason: format!("Invalid placeId: {}", e),
            })?,
            name: name.trim().to_string(),
        });
    }

    Ok(places)
}

/// Parse similarity.dat into raw rows; squareness is checked by the caller
pub fn parse_similarity(path: &Path) -> Result<Vec<Vec<f32>>> {
    let content = read_artifact(path)?;
    let file = file_name(path);

    numbered_lines(&content)
        .map(|(line_no, line)| parse_vector(line, &file, line_no))
        .collect()
}

/// Parse the city_pivot.dat rating pivot
///
/// Format: name::value,value,...
pub fn parse_pivot(path: &Path) -> Result<Vec<(String, Vec<f32>)>> {
    let content = read_artifact(path)?;
    let file = file_name(path);
    let mut rows = Vec::new();

    for (line_no, line) in numbered_lines(&content) {
        let mut parts = line.splitn(2, "::");

        let label = next_field(&mut parts, &file, line_no, "city")?;
        let values = next_field(&mut parts, &file, line_no, "ratings")?;

        rows.push((label.trim().to_string(), parse_vector(values, &file, line_no)?));
    }

    Ok(rows)
}

/// Parse the links.dat metadata table
///
/// Format: city::country::population::area_sq_mi::url
pub fn parse_links(path: &Path) -> Result<Vec<CityRecord>> {
    let content = read_artifact(path)?;
    let file = file_name(path);
    let mut records = Vec::new();

    for (line_no, line) in numbered_lines(&content) {
        let mut parts = line.split("::");

        let city = next_field(&mut parts, &file, line_no, "city")?;
        let country = next_field(&mut parts, &file, line_no, "country")?;
        let population = next_field(&mut parts, &file, line_no, "population")?;
        let area = next_field(&mut parts, &file, line_no, "area")?;
        let url = next_field(&mut parts, &file, line_no, "url")?;

        records.push(CityRecord {
            city: city.trim().to_string(),
            country: country.trim().to_string(),
            population: parse_population(population).map_err(|reason| {
                ArtifactError::ParseError {
                    file: file.clone(),
                    line: line_no,
                    reason,
                }
            })?,
            area_sq_mi: area.trim().replace(',', "").parse().map_err(|e| {
                ArtifactError::ParseError {
                    file: file.clone(),
                    line: line_no,
                    reason: format!("Invalid area: {}", e),
                }
            })?,
            url: url.trim().to_string(),
        });
    }

    Ok(records)
}

/// Population figures may carry thousands separators: "2,140,526"
fn parse_population(s: &str) -> std::result::Result<u64, String> {
    s.trim()
        .replace(',', "")
        .parse()
        .map_err(|e| format!("Invalid population: {}", e))
}

/// Parse model.json
pub fn parse_model(path: &Path) -> Result<ModelDescriptor> {
    let content = read_artifact(path)?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::neighbors::DistanceMetric;
    use std::path::PathBuf;

    /// Write `content` to a uniquely named temp file
    fn write_temp(name: &str, content: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("data-loader-parser-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_parse_places() {
        let path = write_temp("places.dat", "1::Paris\n\n2::Rome\n3::Saint-Jean::de-Luz\n");
        let places = parse_places(&path).unwrap();

        assert_eq!(places.len(), 3);
        assert_eq!(places[0], Place::new(1, "Paris"));
        assert_eq!(places[2].name, "Saint-Jean::de-Luz");
    }

    #[test]
    fn test_parse_places_reports_line() {
        let path = write_temp("bad_places.dat", "1::Paris\nx::Rome\n");
        let err = parse_places(&path).unwrap_err();

        assert!(matches!(err, ArtifactError::ParseError { line: 2, .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = parse_places(Path::new("/definitely/not/here/places.dat")).unwrap_err();
        assert!(matches!(err, ArtifactError::FileNotFound { .. }));
    }

    #[test]
    fn test_parse_similarity_and_pivot() {
        let path = write_temp("similarity.dat", "1.0, 0.5\n0.5,1.0\n");
        assert_eq!(parse_similarity(&path).unwrap(), vec![vec![1.0, 0.5], vec![0.5, 1.0]]);

        let path = write_temp("city_pivot.dat", "Paris::4.0,0.0\nRome::0.0,3.5\n");
        let rows = parse_pivot(&path).unwrap();
        assert_eq!(rows[1], ("Rome".to_string(), vec![0.0, 3.5]));
    }

    #[test]
    fn test_parse_links() {
        let path = write_temp(
            "links.dat",
            "Paris::France::2,140,526::40.7::https://en.wikipedia.org/wiki/Paris\n",
        );
        let records = parse_links(&path).unwrap();

        assert_eq!(records[0].population, 2_140_526);
        assert_eq!(records[0].area_sq_mi, 40.7);
        assert_eq!(records[0].url, "https://en.wikipedia.org/wiki/Paris");
    }

    #[test]
    fn test_parse_links_missing_field() {
        let path = write_temp("short_links.dat", "Paris::France::2140526\n");
        let err = parse_links(&path).unwrap_err();

        assert!(err.to_string().contains("Missing area"));
    }

    #[test]
    fn test_parse_model() {
        let path = write_temp("model.json", r#"{"metric": "manhattan"}"#);
        assert_eq!(parse_model(&path).unwrap().metric, DistanceMetric::Manhattan);

        let path = write_temp("bad_model.json", r#"{"metric": "hamming"}"#);
        assert!(matches!(parse_model(&path), Err(ArtifactError::ModelError(_))));
    }
}
