//! Darknet-style label files: one text file per image.
//!
//! Each non-empty line is `<label> <x_center> <y_center> <width> <height>`
//! with the four numeric fields relative to the image dimensions, so label
//! files are independent of image resolution. The label token is a
//! zero-based index into the class label map when one is given, the
//! sentinel `?` for an unlabeled box, or a literal base-10 integer string
//! otherwise.

use std::fmt::Write as _;

use super::codec::{Codec, CodecOptions, ImageCodec};
use super::record::{Annotation, AnyBox};
use crate::error::BoxportError;

/// Registry factory for the `darknet` format.
pub fn factory(options: &CodecOptions) -> Result<Codec, BoxportError> {
    Ok(Codec::PerImage(Box::new(DarknetCodec::new(options)?)))
}

/// Codec for darknet label files.
#[derive(Debug)]
pub struct DarknetCodec {
    image_width: f64,
    image_height: f64,
    class_label_map: Option<Vec<String>>,
}

impl DarknetCodec {
    /// Creates the codec; `image_width` and `image_height` are required.
    pub fn new(options: &CodecOptions) -> Result<Self, BoxportError> {
        let image_width = options.image_width.ok_or(BoxportError::MissingOption {
            format: "darknet",
            option: "image_width",
        })?;
        let image_height = options.image_height.ok_or(BoxportError::MissingOption {
            format: "darknet",
            option: "image_height",
        })?;

        Ok(Self {
            image_width,
            image_height,
            class_label_map: options.class_label_map.clone(),
        })
    }

    fn label_token(&self, class_label: &str) -> Result<String, BoxportError> {
        match &self.class_label_map {
            Some(map) => map
                .iter()
                .position(|label| label == class_label)
                .map(|index| index.to_string())
                .ok_or_else(|| BoxportError::LabelNotInMap {
                    label: class_label.to_string(),
                }),
            None if class_label.is_empty() => Ok("?".to_string()),
            None => {
                class_label
                    .parse::<i64>()
                    .map_err(|_| BoxportError::InvalidLabel {
                        label: class_label.to_string(),
                    })?;
                Ok(class_label.to_string())
            }
        }
    }

    fn resolve_label(&self, token: &str, line: usize) -> Result<String, BoxportError> {
        match &self.class_label_map {
            Some(map) => {
                let index =
                    token
                        .parse::<usize>()
                        .map_err(|_| BoxportError::MalformedLine {
                            line,
                            message: format!("invalid class label index '{token}'"),
                        })?;
                map.get(index)
                    .cloned()
                    .ok_or_else(|| BoxportError::MalformedLine {
                        line,
                        message: format!(
                            "class label index {index} is out of range for map with {} label(s)",
                            map.len()
                        ),
                    })
            }
            None if token == "?" => Ok(String::new()),
            None => Ok(token.to_string()),
        }
    }
}

impl ImageCodec for DarknetCodec {
    fn extension(&self) -> &'static str {
        "txt"
    }

    fn serialize(&self, records: &[AnyBox]) -> Result<Vec<u8>, BoxportError> {
        let mut result = String::new();

        for record in records {
            let anno = Annotation::from_record(record);
            if anno.lost {
                // The format cannot express absent instances.
                continue;
            }

            let token = self.label_token(&anno.geometry.class_label)?;
            let x_center = anno.geometry.x_top_left + anno.geometry.width / 2.0;
            let y_center = anno.geometry.y_top_left + anno.geometry.height / 2.0;

            writeln!(
                result,
                "{} {} {} {} {}",
                token,
                x_center / self.image_width,
                y_center / self.image_height,
                anno.geometry.width / self.image_width,
                anno.geometry.height / self.image_height,
            )
            .expect("writing to a String cannot fail");
        }

        Ok(result.into_bytes())
    }

    fn deserialize(&self, content: &[u8]) -> Result<Vec<AnyBox>, BoxportError> {
        let text = std::str::from_utf8(content).map_err(|_| BoxportError::NotUtf8)?;
        let mut result = Vec::new();

        for (line_idx, line) in text.lines().enumerate() {
            let line_num = line_idx + 1;
            if line.trim().is_empty() {
                continue;
            }

            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.len() != 5 {
                return Err(BoxportError::MalformedLine {
                    line: line_num,
                    message: format!("expected 5 tokens, found {}", tokens.len()),
                });
            }

            let x_center = parse_field(tokens[1], "x_center", line_num)? * self.image_width;
            let y_center = parse_field(tokens[2], "y_center", line_num)? * self.image_height;
            let width = parse_field(tokens[3], "width", line_num)? * self.image_width;
            let height = parse_field(tokens[4], "height", line_num)? * self.image_height;

            let mut anno = Annotation::new();
            anno.geometry.class_label = self.resolve_label(tokens[0], line_num)?;
            anno.geometry.width = width;
            anno.geometry.height = height;
            anno.geometry.x_top_left = x_center - width / 2.0;
            anno.geometry.y_top_left = y_center - height / 2.0;

            result.push(anno.into());
        }

        Ok(result)
    }
}

fn parse_field(raw: &str, field_name: &str, line: usize) -> Result<f64, BoxportError> {
    raw.parse::<f64>().map_err(|_| BoxportError::MalformedLine {
        line,
        message: format!("invalid {field_name} '{raw}'; expected floating-point number"),
    })
}
