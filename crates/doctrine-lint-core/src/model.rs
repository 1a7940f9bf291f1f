//! Structured view of one PHP class and its mapping attributes.
//!
//! Produced by [`crate::extract`] and consumed read-only by every rule.

use crate::mapping::{self, COLLECTION_TYPES};
use serde::Serialize;
use std::collections::BTreeMap;

/// What a class is, decided once during extraction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassKind {
    /// Carries `#[Entity]`.
    Entity,
    /// Carries `#[Embeddable]`.
    Embeddable,
    /// Carries `#[MappedSuperclass]`.
    MappedSuperclass,
    /// `*Repository` extending a Doctrine repository base class.
    Repository,
    /// Anything else.
    #[default]
    Unclassified,
}

/// Member visibility.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// `public`, also the default when no modifier is written.
    #[default]
    Public,
    /// `protected`
    Protected,
    /// `private`
    Private,
}

impl Visibility {
    /// Parses a visibility keyword.
    #[must_use]
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "public" => Some(Self::Public),
            "protected" => Some(Self::Protected),
            "private" => Some(Self::Private),
            _ => None,
        }
    }
}

/// A literal argument value inside an attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum AttrValue {
    /// Quoted string, unescaped.
    Str(String),
    /// Integer literal.
    Int(i64),
    /// `true` / `false`.
    Bool(bool),
    /// `null`.
    Null,
    /// `Foo::class`, stored without leading `\`.
    ClassRef(String),
    /// Class constant such as `Types::STRING`.
    Constant {
        /// Class part, without leading `\`.
        class: String,
        /// Constant name.
        name: String,
    },
    /// `[...]`, kept raw.
    Array(String),
    /// Anything else, kept raw.
    Expr(String),
}

impl AttrValue {
    /// Parses one argument value.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();

        if let Some(s) = unquote(raw) {
            return Self::Str(s);
        }
        match raw.to_ascii_lowercase().as_str() {
            "true" => return Self::Bool(true),
            "false" => return Self::Bool(false),
            "null" => return Self::Null,
            _ => {}
        }
        if let Ok(n) = raw.parse::<i64>() {
            return Self::Int(n);
        }
        if raw.starts_with('[') && raw.ends_with(']') {
            return Self::Array(raw.to_owned());
        }
        if let Some((class, name)) = raw.split_once("::") {
            let class = class.trim().trim_start_matches('\\');
            let name = name.trim();
            let is_ident = |s: &str| {
                !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '\\')
            };
            if is_ident(class) && is_ident(name) {
                if name.eq_ignore_ascii_case("class") {
                    return Self::ClassRef(class.to_owned());
                }
                return Self::Constant {
                    class: class.to_owned(),
                    name: name.to_owned(),
                };
            }
        }

        Self::Expr(raw.to_owned())
    }

    /// Returns the value as text when it names something: a string, a class
    /// reference, or a constant.
    #[must_use]
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::Str(s) | Self::ClassRef(s) => Some(s.clone()),
            Self::Constant { class, name } => Some(format!("{class}::{name}")),
            _ => None,
        }
    }

    /// Resolves a column `type:` value to a DBAL type name.
    ///
    /// Strings are taken as written and `Types::*` constants are translated.
    /// Other constants cannot be resolved statically.
    #[must_use]
    pub fn as_column_type(&self) -> Option<String> {
        match self {
            Self::Str(s) => Some(s.clone()),
            Self::Constant { class, name } if mapping::short_name(class) == "Types" => {
                Some(mapping::dbal_type_from_constant(name))
            }
            _ => None,
        }
    }
}

fn unquote(raw: &str) -> Option<String> {
    let bytes = raw.as_bytes();
    if bytes.len() < 2 {
        return None;
    }
    let quote = bytes[0];
    if !matches!(quote, b'\'' | b'"') || bytes[bytes.len() - 1] != quote {
        return None;
    }

    let inner = &raw[1..raw.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(next) if next == '\\' || next == char::from(quote) => out.push(next),
                Some(next) => {
                    out.push('\\');
                    out.push(next);
                }
                None => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    Some(out)
}

/// One attribute usage such as `#[ORM\Column(type: 'string', length: 180)]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AttributeUsage {
    /// Name as written, e.g. `ORM\Column`.
    pub name: String,
    /// Named arguments (`key: value`).
    pub named: BTreeMap<String, AttrValue>,
    /// Positional arguments in order.
    pub positional: Vec<AttrValue>,
}

impl AttributeUsage {
    /// Creates an attribute with no arguments.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Adds a named argument.
    #[must_use]
    pub fn with_named(mut self, key: impl Into<String>, value: AttrValue) -> Self {
        self.named.insert(key.into(), value);
        self
    }

    /// Adds a positional argument.
    #[must_use]
    pub fn with_positional(mut self, value: AttrValue) -> Self {
        self.positional.push(value);
        self
    }

    /// Name without any namespace alias (`ORM\Column` is `Column`).
    #[must_use]
    pub fn short_name(&self) -> &str {
        mapping::short_name(&self.name)
    }

    /// Whether this is the attribute `short` regardless of alias.
    #[must_use]
    pub fn is(&self, short: &str) -> bool {
        self.short_name() == short
    }

    /// Looks up a parameter by name.
    ///
    /// Named arguments win; otherwise the positional slot for `key` in the
    /// attribute's constructor order is used.
    #[must_use]
    pub fn arg(&self, key: &str) -> Option<&AttrValue> {
        if let Some(v) = self.named.get(key) {
            return Some(v);
        }
        let index = mapping::positional_parameters(self.short_name())
            .iter()
            .position(|p| *p == key)?;
        self.positional.get(index)
    }

    /// Whether a parameter is supplied, by name or position.
    #[must_use]
    pub fn has_arg(&self, key: &str) -> bool {
        self.arg(key).is_some()
    }
}

/// A declared property type, normalized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeclaredType {
    /// Type as written.
    pub raw: String,
    /// Union and intersection members without `null`, leading `\` stripped.
    pub members: Vec<String>,
    /// `?T` or a `null` union member.
    pub nullable: bool,
}

impl DeclaredType {
    /// Parses a type expression such as `?string`, `\DateTimeImmutable`,
    /// `Collection|null` or `Collection&Selectable`.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        let mut nullable = raw.starts_with('?');
        let body = raw.trim_start_matches('?');

        let mut members = Vec::new();
        for member in body.split(['|', '&']) {
            let member = member
                .trim()
                .trim_matches(|c: char| c == '(' || c == ')')
                .trim_start_matches('\\');
            if member.is_empty() {
                continue;
            }
            if member.eq_ignore_ascii_case("null") {
                nullable = true;
                continue;
            }
            members.push(member.to_owned());
        }

        Self {
            raw: raw.to_owned(),
            members,
            nullable,
        }
    }

    /// Normalized name, union members joined with `|`.
    #[must_use]
    pub fn name(&self) -> String {
        self.members.join("|")
    }

    /// Whether any member is a Doctrine collection type.
    #[must_use]
    pub fn is_collection(&self) -> bool {
        self.members
            .iter()
            .any(|m| COLLECTION_TYPES.contains(&mapping::short_name(m)))
    }

    /// Lowercased short names of all members, for compatibility lookups.
    #[must_use]
    pub fn short_names(&self) -> Vec<String> {
        self.members
            .iter()
            .map(|m| mapping::short_name(m).to_ascii_lowercase())
            .collect()
    }
}

/// Kind of a relationship attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AssociationKind {
    /// `#[OneToOne]`
    OneToOne,
    /// `#[OneToMany]`
    OneToMany,
    /// `#[ManyToOne]`
    ManyToOne,
    /// `#[ManyToMany]`
    ManyToMany,
}

impl AssociationKind {
    /// All kinds, in the order their attributes are searched.
    pub const ALL: [Self; 4] = [
        Self::OneToOne,
        Self::OneToMany,
        Self::ManyToOne,
        Self::ManyToMany,
    ];

    /// Attribute short name for this kind.
    #[must_use]
    pub fn attribute_name(self) -> &'static str {
        match self {
            Self::OneToOne => "OneToOne",
            Self::OneToMany => "OneToMany",
            Self::ManyToOne => "ManyToOne",
            Self::ManyToMany => "ManyToMany",
        }
    }

    /// Whether the association holds a collection.
    #[must_use]
    pub fn is_to_many(self) -> bool {
        matches!(self, Self::OneToMany | Self::ManyToMany)
    }

    /// Whether the association points at a single entity.
    #[must_use]
    pub fn is_to_one(self) -> bool {
        matches!(self, Self::OneToOne | Self::ManyToOne)
    }
}

impl std::fmt::Display for AssociationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.attribute_name())
    }
}

/// Association view derived from a property's attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Association {
    /// Relationship kind.
    pub kind: AssociationKind,
    /// `targetEntity`, named or positional.
    pub target_entity: Option<String>,
    /// `mappedBy`, if supplied.
    pub mapped_by: Option<AttrValue>,
    /// `inversedBy`, if supplied.
    pub inversed_by: Option<AttrValue>,
    /// `#[JoinColumn]` on the same property.
    pub has_join_column: bool,
    /// `#[JoinTable]` on the same property.
    pub has_join_table: bool,
    /// `#[OrderBy]` on the same property.
    pub has_order_by: bool,
}

impl Association {
    /// Derives the association from a property's attributes.
    ///
    /// The first relationship attribute wins.
    #[must_use]
    pub fn from_attributes(attributes: &[AttributeUsage]) -> Option<Self> {
        let (kind, attr) = attributes.iter().find_map(|a| {
            AssociationKind::ALL
                .into_iter()
                .find(|k| a.is(k.attribute_name()))
                .map(|k| (k, a))
        })?;

        let has = |name: &str| attributes.iter().any(|a| a.is(name));

        Some(Self {
            kind,
            target_entity: attr
                .arg("targetEntity")
                .and_then(AttrValue::as_text)
                .filter(|t| !t.is_empty()),
            mapped_by: attr.arg("mappedBy").cloned(),
            inversed_by: attr.arg("inversedBy").cloned(),
            has_join_column: has("JoinColumn"),
            has_join_table: has("JoinTable"),
            has_order_by: has("OrderBy"),
        })
    }
}

/// A class property, declared or constructor-promoted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Property {
    /// Name without `$`.
    pub name: String,
    /// Declared type, if any.
    pub ty: Option<DeclaredType>,
    /// Read visibility.
    pub visibility: Visibility,
    /// Write visibility: the `private(set)` / `protected(set)` modifier when
    /// present, otherwise the read visibility.
    pub write_visibility: Visibility,
    /// `readonly`, directly or through a readonly class.
    pub readonly: bool,
    /// `static`.
    pub is_static: bool,
    /// Declared through constructor promotion.
    pub promoted: bool,
    /// 1-based source line.
    pub line: usize,
    /// Attached attributes in source order.
    pub attributes: Vec<AttributeUsage>,
    /// Relationship, derived once from `attributes`.
    pub association: Option<Association>,
}

impl Property {
    /// Whether an attribute with short name `name` is attached.
    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|a| a.is(name))
    }

    /// Returns the first attached attribute with short name `name`.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&AttributeUsage> {
        self.attributes.iter().find(|a| a.is(name))
    }
}

/// A method signature, with its body kept for constructor inspection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MethodSignature {
    /// Method name.
    pub name: String,
    /// Visibility.
    pub visibility: Visibility,
    /// `static`.
    pub is_static: bool,
    /// Declared return type as written.
    pub return_type: Option<String>,
    /// 1-based source line.
    pub line: usize,
    /// Attached attributes.
    pub attributes: Vec<AttributeUsage>,
    /// Body text between the braces; `None` for abstract methods.
    #[serde(skip)]
    pub body: Option<String>,
}

impl MethodSignature {
    /// Whether this is `__construct`.
    #[must_use]
    pub fn is_constructor(&self) -> bool {
        self.name.eq_ignore_ascii_case("__construct")
    }

    /// Whether an attribute with short name `name` is attached.
    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|a| a.is(name))
    }
}

/// The class a source file declares.
///
/// An empty `name` means no class was found; rules have nothing to check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClassDeclaration {
    /// `namespace` declaration, if any.
    pub namespace: Option<String>,
    /// Class name.
    pub name: String,
    /// Parent class as written.
    pub extends: Option<String>,
    /// Classification.
    pub kind: ClassKind,
    /// Declared as `readonly class`.
    pub readonly: bool,
    /// Class-level attributes.
    pub attributes: Vec<AttributeUsage>,
    /// Properties in source order, promoted ones included.
    pub properties: Vec<Property>,
    /// Methods in source order.
    pub methods: Vec<MethodSignature>,
}

impl ClassDeclaration {
    /// Whether a class declaration was located.
    #[must_use]
    pub fn is_located(&self) -> bool {
        !self.name.is_empty()
    }

    /// Whether the class carries a class-level attribute `name`.
    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|a| a.is(name))
    }

    /// Whether any property carries attribute `name`.
    #[must_use]
    pub fn any_property_has(&self, name: &str) -> bool {
        self.properties.iter().any(|p| p.has_attribute(name))
    }

    /// The constructor, if declared.
    #[must_use]
    pub fn constructor(&self) -> Option<&MethodSignature> {
        self.methods.iter().find(|m| m.is_constructor())
    }

    /// Properties carrying an association attribute.
    pub fn associations(&self) -> impl Iterator<Item = (&Property, &Association)> {
        self.properties
            .iter()
            .filter_map(|p| p.association.as_ref().map(|a| (p, a)))
    }

    /// Derives the class kind from its name, parent and class attributes.
    #[must_use]
    pub fn derive_kind(&self) -> ClassKind {
        if self.has_attribute("Embeddable") {
            ClassKind::Embeddable
        } else if self.has_attribute("Entity") {
            ClassKind::Entity
        } else if self.has_attribute("MappedSuperclass") {
            ClassKind::MappedSuperclass
        } else if self.name.ends_with("Repository")
            && self
                .extends
                .as_deref()
                .is_some_and(|p| mapping::REPOSITORY_BASES.contains(&mapping::short_name(p)))
        {
            ClassKind::Repository
        } else {
            ClassKind::Unclassified
        }
    }
}
