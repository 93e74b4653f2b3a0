use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

/// Ordered category names, indexed by the model's class index.
///
/// The file format is one label per line, in the exact order of the model's
/// output dimension. Blank lines are skipped.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    categories: Vec<String>,
}

impl Vocabulary {
    pub fn from_file(filepath: &Path) -> io::Result<Self> {
        let file = File::open(filepath)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: BufRead>(reader: R) -> io::Result<Self> {
        let mut categories = Vec::new();

        for line_result in reader.lines() {
            let line = line_result?;
            let label = line.trim();
            if !label.is_empty() {
                categories.push(label.to_string());
            }
        }

        if categories.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "labels file contains no labels",
            ));
        }

        Ok(Vocabulary { categories })
    }

    pub fn from_labels(categories: Vec<String>) -> Self {
        Vocabulary { categories }
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.categories.get(index).map(String::as_str)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.categories.iter().any(|c| c == label)
    }
}
