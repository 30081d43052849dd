use super::error::TableParseError;

/// How rows are delimited in table text read back from C sources.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RowConvention {
    /// Every row is its own top-level `{ ... }` group (this exporter's output).
    #[default]
    Braced,
    /// Rows are flat field lists terminated by `},` (ZAPD-extracted assets).
    Flat,
}

/// Drops `//` and `/* */` comments and every whitespace character.
pub(crate) fn normalize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '/' if chars.peek() == Some(&'/') => {
                for next in chars.by_ref() {
                    if next == '\n' {
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = '\0';
                for next in chars.by_ref() {
                    if prev == '*' && next == '/' {
                        break;
                    }
                    prev = next;
                }
            }
            ch if ch.is_whitespace() => {}
            ch => out.push(ch),
        }
    }
    out
}

/// The initializer body of the first `<Type> <name>[] = { ... };` definition.
pub(crate) fn array_body(normalized: &str) -> Result<&str, TableParseError> {
    let start = normalized
        .find("[]={")
        .map(|idx| idx + "[]={".len())
        .ok_or(TableParseError::MissingArrayBody)?;
    let end = normalized[start..]
        .find("};")
        .map(|idx| start + idx)
        .ok_or(TableParseError::MissingArrayBody)?;
    Ok(&normalized[start..end])
}

pub(crate) fn split_rows(
    normalized: &str,
    convention: RowConvention,
) -> Result<Vec<&str>, TableParseError> {
    match convention {
        RowConvention::Braced => split_braced_rows(normalized),
        RowConvention::Flat => Ok(normalized
            .split("},")
            .filter(|row| !row.is_empty())
            .collect()),
    }
}

fn split_braced_rows(normalized: &str) -> Result<Vec<&str>, TableParseError> {
    let mut rows = Vec::new();
    let mut depth = 0usize;
    let mut row_start = 0usize;
    let mut stray_start: Option<usize> = None;

    for (idx, ch) in normalized.char_indices() {
        if depth == 0 {
            match ch {
                '{' => {
                    if let Some(start) = stray_start.take() {
                        return Err(stray(&normalized[start..idx]));
                    }
                    depth = 1;
                    row_start = idx;
                }
                ',' => {
                    if let Some(start) = stray_start.take() {
                        return Err(stray(&normalized[start..idx]));
                    }
                }
                '}' => return Err(TableParseError::UnbalancedBraces { offset: idx }),
                _ => {
                    stray_start.get_or_insert(idx);
                }
            }
            continue;
        }

        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    rows.push(&normalized[row_start..=idx]);
                }
            }
            _ => {}
        }
    }

    if depth != 0 {
        return Err(TableParseError::UnbalancedBraces {
            offset: normalized.len(),
        });
    }
    if let Some(start) = stray_start {
        return Err(stray(&normalized[start..]));
    }
    Ok(rows)
}

fn stray(text: &str) -> TableParseError {
    TableParseError::StrayText {
        text: text.to_string(),
    }
}

/// Row fields with braces removed; empty fields left by trailing commas are dropped.
pub(crate) fn row_fields(row: &str) -> Vec<String> {
    row.replace(['{', '}'], "")
        .split(',')
        .filter(|field| !field.is_empty())
        .map(ToString::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_comments_and_whitespace() {
        let raw = "// Door\n{\n    /* Actor ID */ ACTOR_EN_DOOR, // trailing\n    { 1, 2, 3 }\n},";
        assert_eq!(normalize(raw), "{ACTOR_EN_DOOR,{1,2,3}},");
    }

    #[test]
    fn array_body_finds_initializer() {
        let normalized = normalize("TransitionActorEntry t[] = {\n{ 1 },\n{ 2 },\n};\n\n");
        assert_eq!(array_body(&normalized).expect("body"), "{1},{2},");
        assert_eq!(
            array_body("nothing here"),
            Err(TableParseError::MissingArrayBody)
        );
    }

    #[test]
    fn braced_rows_keep_nested_groups_together() {
        let rows = split_rows(
            "{{0,0,1,0},A,{1,2,3},4,5},{{1,0,1,0},B,{4,5,6},7,8,},",
            RowConvention::Braced,
        )
        .expect("rows");
        assert_eq!(
            rows,
            vec!["{{0,0,1,0},A,{1,2,3},4,5}", "{{1,0,1,0},B,{4,5,6},7,8,}"]
        );
    }

    #[test]
    fn braced_rows_reject_unbalanced_and_stray_text() {
        assert!(matches!(
            split_rows("{{0,1},", RowConvention::Braced),
            Err(TableParseError::UnbalancedBraces { .. })
        ));
        assert!(matches!(
            split_rows("{0},junk,{1}", RowConvention::Braced),
            Err(TableParseError::StrayText { .. })
        ));
    }

    #[test]
    fn flat_rows_split_on_closing_brace_comma() {
        let rows = split_rows(
            "{0,255,1,255,A,1,2,3,0x4000,0x0},{1,2},",
            RowConvention::Flat,
        )
        .expect("rows");
        assert_eq!(rows, vec!["{0,255,1,255,A,1,2,3,0x4000,0x0", "{1,2"]);
    }

    #[test]
    fn fields_drop_trailing_comma_artifacts() {
        assert_eq!(
            row_fields("{{0,0,1,0,},A,{1,2,3},4,5,}"),
            vec!["0", "0", "1", "0", "A", "1", "2", "3", "4", "5"]
        );
    }
}
