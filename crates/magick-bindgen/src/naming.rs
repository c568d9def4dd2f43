//! Identifier case conversion for generated names

/// Convert a snake_case method name to PascalCase (`read_blob` -> `ReadBlob`).
pub fn to_pascal_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper = true;
    for ch in name.chars() {
        if ch == '_' {
            upper = true;
        } else if upper {
            out.extend(ch.to_uppercase());
            upper = false;
        } else {
            out.push(ch);
        }
    }
    out
}

/// Convert a native symbol to a snake_case Rust identifier
/// (`MagickImage_RemoveArtifact` -> `magick_image_remove_artifact`).
pub fn to_snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);
    for (i, &ch) in chars.iter().enumerate() {
        if ch == '_' {
            if !out.ends_with('_') && !out.is_empty() {
                out.push('_');
            }
            continue;
        }
        if ch.is_uppercase() {
            let prev = if i > 0 { chars.get(i - 1).copied() } else { None };
            let next = chars.get(i + 1).copied();
            let boundary = match prev {
                Some(p) if p.is_lowercase() || p.is_ascii_digit() => true,
                Some(p) if p.is_uppercase() => next.is_some_and(|n| n.is_lowercase()),
                _ => false,
            };
            if boundary && !out.ends_with('_') {
                out.push('_');
            }
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pascal_case() {
        assert_eq!(to_pascal_case("read_blob"), "ReadBlob");
        assert_eq!(to_pascal_case("width"), "Width");
        assert_eq!(to_pascal_case("line_to_horizontal"), "LineToHorizontal");
        assert_eq!(to_pascal_case("clone_image"), "CloneImage");
    }

    #[test]
    fn test_snake_case() {
        assert_eq!(to_snake_case("MagickImage_RemoveArtifact"), "magick_image_remove_artifact");
        assert_eq!(to_snake_case("MagickImage_Dispose"), "magick_image_dispose");
        assert_eq!(to_snake_case("DrawingWand_PathLineToAbs"), "drawing_wand_path_line_to_abs");
        assert_eq!(to_snake_case("HTMLParser"), "html_parser");
        assert_eq!(to_snake_case("already_snake"), "already_snake");
    }
}
