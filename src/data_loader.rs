use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use csv::StringRecord;

use crate::errors::LoadError;

#[derive(Debug)]
pub struct PersonLoadProfile {
    pub id_column: usize,
    pub label_column: usize,
    pub notable_company_column: usize,
    pub type1_column: usize,
    pub type2_column: usize,
    pub gender_column: usize,
    pub photo_url_column: usize,
}

impl PersonLoadProfile {
    pub fn from_headers(headers: &[String]) -> Result<Self, LoadError> {
        Ok(Self {
            id_column: find_column(headers, "id")?,
            label_column: find_column(headers, "label")?,
            notable_company_column: find_column(headers, "notable_company")?,
            type1_column: find_column(headers, "type1")?,
            type2_column: find_column(headers, "type2")?,
            gender_column: find_column(headers, "gender")?,
            photo_url_column: find_column(headers, "photo_url")?,
        })
    }
}

impl Display for PersonLoadProfile {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Person column offsets: id:{}, label:{}, notable_company:{}, type1:{}, type2:{}, gender:{}, photo_url:{}",
            self.id_column,
            self.label_column,
            self.notable_company_column,
            self.type1_column,
            self.type2_column,
            self.gender_column,
            self.photo_url_column,
        )
    }
}

#[derive(Debug)]
pub struct RelationshipLoadProfile {
    pub source_column: usize,
    pub target_column: usize,
    pub label_column: usize,
    pub strength_column: usize,
}

impl RelationshipLoadProfile {
    pub fn from_headers(headers: &[String]) -> Result<Self, LoadError> {
        Ok(Self {
            source_column: find_column(headers, "source")?,
            target_column: find_column(headers, "target")?,
            label_column: find_column(headers, "relationship")?,
            strength_column: find_column(headers, "strength")?,
        })
    }
}

impl Display for RelationshipLoadProfile {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Relationship column offsets: source:{}, target:{}, relationship:{}, strength:{}",
            self.source_column, self.target_column, self.label_column, self.strength_column,
        )
    }
}

fn find_column(headers: &[String], name: &str) -> Result<usize, LoadError> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| LoadError::MissingColumn {
            column: name.to_string(),
        })
}

pub fn get_headers_from_file(filename: &str, separator: u8) -> Result<Vec<String>, LoadError> {
    let file = File::open(filename)?;
    let reader = BufReader::new(file);
    let mut lines = reader.lines();

    if let Some(header) = lines.next() {
        let headers: Vec<String> = header?
            .split(separator as char)
            .map(|col_name| col_name.trim().to_string())
            .collect();

        Ok(headers)
    } else {
        Err(LoadError::Io(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            format!("Failed to read header from file {}", filename),
        )))
    }
}

pub fn load_csv(filename: &str) -> Result<Vec<StringRecord>, LoadError> {
    let path = Path::new(filename);
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b',')
        .has_headers(true)
        .from_path(path)?;

    let records: Vec<StringRecord> = reader.records().collect::<Result<_, _>>()?;

    Ok(records)
}

pub fn load_tsv(filename: &str) -> Result<Vec<StringRecord>, LoadError> {
    let path = Path::new(filename);
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .from_path(path)?;

    let records: Vec<StringRecord> = reader.records().collect::<Result<_, _>>()?;

    Ok(records)
}
