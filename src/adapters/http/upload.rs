//! Multipart form reading shared by the upload endpoints.

use std::collections::HashMap;

use axum::{extract::Multipart, response::Response};

use super::error::validation_failed;

/// A multipart body with one file part and any number of text parts.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub file_name: String,
    pub bytes: Vec<u8>,
    fields: HashMap<String, String>,
}

impl UploadForm {
    /// Drains the multipart stream. The part named `file_field` becomes the
    /// file; every other named part is kept as text.
    pub async fn read(mut multipart: Multipart, file_field: &str) -> Result<Self, Response> {
        let mut form = UploadForm::default();

        loop {
            let field = match multipart.next_field().await {
                Ok(Some(field)) => field,
                Ok(None) => break,
                Err(e) => return Err(validation_failed(file_field, e.body_text())),
            };
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            if name == file_field {
                form.file_name = field.file_name().unwrap_or_default().to_string();
                form.bytes = field
                    .bytes()
                    .await
                    .map_err(|e| validation_failed(file_field, e.body_text()))?
                    .to_vec();
            } else {
                let value = field
                    .text()
                    .await
                    .map_err(|e| validation_failed(&name, e.body_text()))?;
                form.fields.insert(name, value);
            }
        }

        Ok(form)
    }

    /// Text value of a part, empty when absent.
    pub fn field(&self, name: &str) -> String {
        self.fields.get(name).cloned().unwrap_or_default()
    }
}
