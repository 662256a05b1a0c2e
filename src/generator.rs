use crate::GenerateError;
use crate::field::FieldDefinition;
use tracing::info;

pub const DEFAULT_INDENT: usize = 2;

/// Renders an ordered field list as an HTML form, one element per line.
///
/// Element ids are `field-{position}`, so they follow the field around when
/// the list is reordered. Labels and option texts are written verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeGenerator {
    indent: usize,
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_INDENT)
    }
}

impl CodeGenerator {
    pub fn new(indent: usize) -> Self {
        Self { indent }
    }

    pub fn indent(&self) -> usize {
        self.indent
    }

    pub fn generate(&self, fields: &[FieldDefinition]) -> Result<String, GenerateError> {
        if fields.is_empty() {
            return Err(GenerateError::EmptyFieldList);
        }

        let mut out = String::from("<form>\n");
        for (index, field) in fields.iter().enumerate() {
            self.field_block(&mut out, index, field);
        }
        out.push_str("</form>\n");

        info!(fields = fields.len(), bytes = out.len(), "generated form markup");
        Ok(out)
    }

    fn field_block(&self, out: &mut String, index: usize, field: &FieldDefinition) {
        let id = format!("field-{index}");
        let required = if field.is_required { " required" } else { "" };

        self.line(out, 1, &format!("<label for=\"{id}\">{}:</label>", field.label));

        if field.field_type.is_select() {
            self.line(out, 1, &format!("<select id=\"{id}\" name=\"{id}\"{required}>"));
            for (n, option) in field.options.iter().enumerate() {
                self.line(
                    out,
                    2,
                    &format!("<option value=\"option{}\">{option}</option>", n + 1),
                );
            }
            self.line(out, 1, "</select>");
        } else {
            self.line(
                out,
                1,
                &format!(
                    "<input type=\"{}\" id=\"{id}\" name=\"{id}\"{required}>",
                    field.field_type
                ),
            );
        }
    }

    fn line(&self, out: &mut String, depth: usize, text: &str) {
        out.extend(std::iter::repeat_n(' ', depth * self.indent));
        out.push_str(text);
        out.push('\n');
    }
}

/// Generates with the default two-space indentation.
pub fn generate(fields: &[FieldDefinition]) -> Result<String, GenerateError> {
    CodeGenerator::default().generate(fields)
}
