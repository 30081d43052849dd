pub const INDENT: &str = "    ";

/// A declaration fragment for the header plus the matching definition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CData {
    pub header: String,
    pub source: String,
}

impl CData {
    pub fn append(&mut self, other: CData) {
        self.header.push_str(&other.header);
        self.source.push_str(&other.source);
    }

    /// `extern <ty> <name>[];` and `<ty> <name>[] = {\n<body>};\n\n`.
    pub(crate) fn array(element_type: &str, name: &str, body: &str) -> Self {
        let list_name = format!("{element_type} {name}");
        Self {
            header: format!("extern {list_name}[];\n"),
            source: format!("{list_name}[] = {{\n{body}}};\n\n"),
        }
    }
}
