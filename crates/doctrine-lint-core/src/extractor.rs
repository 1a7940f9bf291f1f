//! Metadata extraction: PHP source text to [`ClassDeclaration`].
//!
//! This is deliberately not a PHP parser. Regexes locate declarations and the
//! [`scanner`](crate::scanner) balances brackets so nested attribute arguments
//! such as `options: ['default' => 0]` or `new JoinColumn(...)` never cut an
//! argument list short. Anything that does not look like a declaration is
//! skipped.

use crate::model::{
    Association, AttrValue, AttributeUsage, ClassDeclaration, DeclaredType, MethodSignature,
    Property, Visibility,
};
use crate::scanner;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

#[allow(clippy::expect_used)]
static NAMESPACE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*namespace\s+([A-Za-z_\\][\w\\]*)\s*[;{]").expect("namespace pattern")
});

#[allow(clippy::expect_used)]
static CLASS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:^|[\s;}\]])((?:(?:final|abstract|readonly)\s+)*)class\s+([A-Za-z_]\w*)(?:\s+extends\s+([\\\w]+))?(?:\s+implements\s+[\\\w\s,]+?)?\s*\{",
    )
    .expect("class pattern")
});

#[allow(clippy::expect_used)]
static FUNCTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^((?:(?:public|protected|private|static|final|abstract)\s+)*)function\s+&?\s*([A-Za-z_]\w*)\s*\(",
    )
    .expect("function pattern")
});

#[allow(clippy::expect_used)]
static PROPERTY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^((?:(?:public|protected|private)(?:\(set\))?\s+|(?:var|static|readonly|final|abstract)\s+)+)(?:([?\\\w|&()]+)\s+)?\$([A-Za-z_]\w*)",
    )
    .expect("property pattern")
});

#[allow(clippy::expect_used)]
static PROMOTED_PARAM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^((?:(?:public|protected|private)(?:\(set\))?\s+|readonly\s+)+)(?:([?\\\w|&()]+)\s+)?&?\s*(?:\.\.\.)?\$([A-Za-z_]\w*)",
    )
    .expect("promoted parameter pattern")
});

#[allow(clippy::expect_used)]
static GROUPED_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\$([A-Za-z_]\w*)").expect("grouped property pattern"));

#[allow(clippy::expect_used)]
static ATTRIBUTE_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\\?[A-Za-z_][\w\\]*").expect("attribute name pattern"));

#[allow(clippy::expect_used)]
static NAMED_ARG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^([A-Za-z_]\w*)\s*:(.*)$").expect("named argument pattern"));

/// Extracts the class declared in `source`.
///
/// Returns an empty [`ClassDeclaration`] (only the namespace filled in) when
/// no class is found.
#[must_use]
pub fn extract(source: &str) -> ClassDeclaration {
    let code = scanner::mask_comments(source);

    let mut class = ClassDeclaration {
        namespace: NAMESPACE_RE.captures(&code).map(|c| c[1].to_owned()),
        ..ClassDeclaration::default()
    };

    let Some(caps) = CLASS_RE.captures(&code) else {
        debug!("No class declaration found");
        return class;
    };

    let (Some(whole), Some(modifiers), Some(name)) = (caps.get(0), caps.get(1), caps.get(2)) else {
        return class;
    };
    // The leading delimiter is part of the match; the declaration begins at
    // the modifiers (or at `class` when there are none).
    let decl_start = modifiers.start();
    let open_brace = whole.end() - 1;

    class.name = name.as_str().to_owned();
    class.extends = caps
        .get(3)
        .map(|m| m.as_str().trim_start_matches('\\').to_owned());
    class.readonly = modifiers.as_str().split_whitespace().any(|m| m == "readonly");
    class.attributes = class_attributes(&code, decl_start);

    let body_end = scanner::matching_close(&code, open_brace).unwrap_or(code.len());
    scan_members(&code, open_brace + 1, body_end, &mut class);

    if class.readonly {
        for property in &mut class.properties {
            property.readonly = true;
        }
    }
    class.kind = class.derive_kind();

    debug!(
        "Extracted class {} ({:?}): {} properties, {} methods",
        class.name,
        class.kind,
        class.properties.len(),
        class.methods.len()
    );

    class
}

/// Collects the attribute groups directly preceding the class keyword.
fn class_attributes(code: &str, decl_start: usize) -> Vec<AttributeUsage> {
    let groups = scanner::attribute_groups(code, 0, decl_start);

    // Walk back from the declaration, keeping groups separated only by
    // whitespace from what follows them.
    let mut attached = Vec::new();
    let mut next_start = decl_start;
    for &(start, close) in groups.iter().rev() {
        if !code[close + 1..next_start].trim().is_empty() {
            break;
        }
        attached.push((start, close));
        next_start = start;
    }

    attached
        .into_iter()
        .rev()
        .flat_map(|(start, close)| parse_attribute_group(&code[start + 2..close]))
        .collect()
}

/// Walks the class body member by member.
fn scan_members(code: &str, start: usize, end: usize, class: &mut ClassDeclaration) {
    let bytes = code.as_bytes();
    let mut pending: Vec<AttributeUsage> = Vec::new();
    let mut i = start;

    while i < end {
        if bytes[i].is_ascii_whitespace() {
            i += 1;
            continue;
        }

        if bytes[i] == b'#' && bytes.get(i + 1) == Some(&b'[') {
            match scanner::matching_close(code, i + 1) {
                Some(close) if close < end => {
                    pending.extend(parse_attribute_group(&code[i + 2..close]));
                    i = close + 1;
                    continue;
                }
                _ => break,
            }
        }

        let (sig_end, member_end, body) = scanner::member_extent(code, i, end);
        let signature = code[i..sig_end].trim();
        let line = scanner::line_at(code, i);
        let attributes = std::mem::take(&mut pending);

        if let Some(caps) = FUNCTION_RE.captures(signature) {
            let method = parse_method(code, signature, &caps, line, attributes, body);
            if method.is_constructor() {
                class
                    .properties
                    .extend(promoted_properties(code, signature, &caps));
            }
            class.methods.push(method);
        } else {
            class
                .properties
                .extend(parse_properties(signature, line, attributes));
        }

        i = member_end.max(i + 1);
    }
}

fn parse_method(
    code: &str,
    signature: &str,
    caps: &regex::Captures<'_>,
    line: usize,
    attributes: Vec<AttributeUsage>,
    body: Option<(usize, usize)>,
) -> MethodSignature {
    let modifiers = caps.get(1).map_or("", |m| m.as_str());
    let name = caps.get(2).map_or("", |m| m.as_str());
    let open_paren = caps.get(0).map_or(0, |m| m.end() - 1);

    let return_type = scanner::matching_close(signature, open_paren).and_then(|close| {
        let rest = signature[close + 1..].trim_start();
        let ty = rest.strip_prefix(':')?.trim();
        (!ty.is_empty()).then(|| ty.to_owned())
    });

    MethodSignature {
        name: name.to_owned(),
        visibility: visibility_of(modifiers),
        is_static: has_modifier(modifiers, "static"),
        return_type,
        line,
        attributes,
        body: body.map(|(b0, b1)| code[b0..b1].to_owned()),
    }
}

/// Properties declared through constructor promotion.
fn promoted_properties(code: &str, signature: &str, caps: &regex::Captures<'_>) -> Vec<Property> {
    let open_paren = caps.get(0).map_or(0, |m| m.end() - 1);
    let Some(close) = scanner::matching_close(signature, open_paren) else {
        return Vec::new();
    };

    let mut properties = Vec::new();
    for param in scanner::split_top_level(&signature[open_paren + 1..close], b',') {
        let mut rest = param;
        let mut attributes = Vec::new();
        while rest.starts_with("#[") {
            let Some(end) = scanner::matching_close(rest, 1) else {
                break;
            };
            attributes.extend(parse_attribute_group(&rest[2..end]));
            rest = rest[end + 1..].trim_start();
        }

        let Some(p) = PROMOTED_PARAM_RE.captures(rest) else {
            continue;
        };
        let modifiers = p.get(1).map_or("", |m| m.as_str());
        let line = scanner::line_at(code, scanner::offset_in(code, rest));

        properties.push(build_property(
            modifiers,
            p.get(2).map(|m| m.as_str()),
            p.get(3).map_or("", |m| m.as_str()),
            line,
            attributes,
            true,
        ));
    }

    properties
}

/// Parses a property declaration, including grouped ones such as
/// `public int $a, $b = 1;`. Every name in a group shares the modifiers,
/// type and attributes.
fn parse_properties(signature: &str, line: usize, attributes: Vec<AttributeUsage>) -> Vec<Property> {
    // `public const FOO = 1` never matches: the `$` is mandatory.
    let Some(caps) = PROPERTY_RE.captures(signature) else {
        return Vec::new();
    };
    let (Some(whole), Some(first)) = (caps.get(0), caps.get(3)) else {
        return Vec::new();
    };
    let modifiers = caps.get(1).map_or("", |m| m.as_str());
    let ty = caps.get(2).map(|m| m.as_str());

    let mut names = vec![first.as_str()];
    names.extend(
        scanner::split_top_level(&signature[whole.end()..], b',')
            .into_iter()
            .filter_map(|piece| GROUPED_NAME_RE.captures(piece.trim()))
            .filter_map(|c| c.get(1).map(|m| m.as_str())),
    );

    names
        .into_iter()
        .map(|name| build_property(modifiers, ty, name, line, attributes.clone(), false))
        .collect()
}

fn build_property(
    modifiers: &str,
    ty: Option<&str>,
    name: &str,
    line: usize,
    attributes: Vec<AttributeUsage>,
    promoted: bool,
) -> Property {
    let association = Association::from_attributes(&attributes);
    Property {
        name: name.to_owned(),
        ty: ty.map(DeclaredType::parse),
        visibility: visibility_of(modifiers),
        write_visibility: write_visibility_of(modifiers),
        readonly: has_modifier(modifiers, "readonly"),
        is_static: has_modifier(modifiers, "static"),
        promoted,
        line,
        attributes,
        association,
    }
}

/// Read visibility from a modifier list; `private(set)` only narrows writes.
fn visibility_of(modifiers: &str) -> Visibility {
    modifiers
        .split_whitespace()
        .find_map(Visibility::from_keyword)
        .unwrap_or_default()
}

/// Write visibility: an explicit `private(set)` / `protected(set)`, else the
/// read visibility.
fn write_visibility_of(modifiers: &str) -> Visibility {
    modifiers
        .split_whitespace()
        .find_map(|m| m.strip_suffix("(set)").and_then(Visibility::from_keyword))
        .unwrap_or_else(|| visibility_of(modifiers))
}

fn has_modifier(modifiers: &str, keyword: &str) -> bool {
    modifiers.split_whitespace().any(|m| m == keyword)
}

/// Parses the text between `#[` and `]` into attribute usages.
///
/// A malformed argument list leaves the attribute with no arguments.
#[must_use]
pub fn parse_attribute_group(inner: &str) -> Vec<AttributeUsage> {
    scanner::split_top_level(inner, b',')
        .into_iter()
        .filter_map(parse_attribute)
        .collect()
}

fn parse_attribute(text: &str) -> Option<AttributeUsage> {
    let name = ATTRIBUTE_NAME_RE.find(text)?;
    let mut attribute = AttributeUsage::new(name.as_str().trim_start_matches('\\'));

    let rest = &text[name.end()..];
    let Some(open) = rest.find('(') else {
        return Some(attribute);
    };
    if !rest[..open].trim().is_empty() {
        return Some(attribute);
    }

    let Some(close) = scanner::matching_close(rest, open) else {
        debug!("Unbalanced arguments for attribute {}", attribute.name);
        return Some(attribute);
    };

    for arg in scanner::split_top_level(&rest[open + 1..close], b',') {
        match NAMED_ARG_RE.captures(arg) {
            // `Foo::class` also matches `key:`; the second colon gives it away.
            Some(caps) if !caps[2].starts_with(':') => {
                attribute
                    .named
                    .insert(caps[1].to_owned(), AttrValue::parse(&caps[2]));
            }
            _ => attribute.positional.push(AttrValue::parse(arg)),
        }
    }

    Some(attribute)
}
