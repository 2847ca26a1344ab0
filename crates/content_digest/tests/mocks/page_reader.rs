use std::sync::{Arc, Mutex};

use content_extract::{document::PageReader, ExtractError};

#[derive(Clone)]
pub struct MockPageReader {
    pub pages: Vec<String>,
    pub calls: Arc<Mutex<Vec<usize>>>,
}

impl MockPageReader {
    pub fn new(pages: &[&str]) -> Self {
        Self {
            pages: pages.iter().map(|p| p.to_string()).collect(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl Default for MockPageReader {
    fn default() -> Self {
        Self::new(&["Default document."])
    }
}

impl PageReader for MockPageReader {
    fn read_pages(&self, bytes: &[u8]) -> Result<Vec<String>, ExtractError> {
        self.calls.lock().unwrap().push(bytes.len());
        Ok(self.pages.clone())
    }
}
