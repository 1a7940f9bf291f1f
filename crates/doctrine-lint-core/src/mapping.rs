//! Doctrine mapping vocabulary: known DBAL types, PHP type compatibility,
//! lifecycle events and well-known base classes.

/// DBAL type names recognized in `#[Column(type: ...)]`.
pub const KNOWN_COLUMN_TYPES: &[&str] = &[
    "string",
    "ascii_string",
    "text",
    "guid",
    "integer",
    "smallint",
    "bigint",
    "boolean",
    "decimal",
    "float",
    "smallfloat",
    "date",
    "date_immutable",
    "datetime",
    "datetime_immutable",
    "datetimetz",
    "datetimetz_immutable",
    "time",
    "time_immutable",
    "dateinterval",
    "array",
    "simple_array",
    "json",
    "object",
    "binary",
    "blob",
    "enum",
    "uuid",
    "ulid",
];

/// Returns the PHP types a property may declare when mapped to `column_type`.
///
/// `None` means the column type is not covered by the table and is not
/// checked. Names are lowercase short class names.
#[must_use]
pub fn compatible_php_types(column_type: &str) -> Option<&'static [&'static str]> {
    let types: &'static [&'static str] = match column_type {
        "integer" | "smallint" => &["int"],
        "bigint" => &["int", "string"],
        "string" | "ascii_string" | "text" | "guid" | "decimal" => &["string"],
        "float" | "smallfloat" => &["float"],
        "boolean" => &["bool"],
        "date" | "datetime" | "datetimetz" | "time" => &["datetime", "datetimeinterface"],
        "date_immutable" | "datetime_immutable" | "datetimetz_immutable" | "time_immutable" => {
            &["datetimeimmutable", "datetimeinterface"]
        }
        "dateinterval" => &["dateinterval"],
        "json" => &["array"],
        "array" | "simple_array" => &["array"],
        _ => return None,
    };
    Some(types)
}

/// Resolves a `Types::CONSTANT` name to its DBAL type name.
///
/// `Types::DATETIME_IMMUTABLE` is `datetime_immutable`; the legacy
/// `*_MUTABLE` constants drop their suffix (`Types::DATE_MUTABLE` is `date`).
#[must_use]
pub fn dbal_type_from_constant(constant: &str) -> String {
    let name = constant.strip_suffix("_MUTABLE").unwrap_or(constant);
    name.to_ascii_lowercase()
}

/// Lifecycle event markers that make `#[HasLifecycleCallbacks]` meaningful.
pub const LIFECYCLE_EVENTS: &[&str] = &[
    "PrePersist",
    "PostPersist",
    "PreUpdate",
    "PostUpdate",
    "PreRemove",
    "PostRemove",
    "PostLoad",
    "PreFlush",
];

/// Base classes that make a `*Repository` class a Doctrine repository.
pub const REPOSITORY_BASES: &[&str] = &["ServiceEntityRepository", "EntityRepository"];

/// Declared types that hold a to-many association.
pub const COLLECTION_TYPES: &[&str] = &[
    "Collection",
    "ArrayCollection",
    "PersistentCollection",
    "Selectable",
];

/// Returns the parameter names of `attribute` in constructor order.
///
/// Used to resolve positional arguments such as `#[ORM\ManyToOne(User::class)]`.
#[must_use]
pub fn positional_parameters(attribute: &str) -> &'static [&'static str] {
    match attribute {
        "Column" => &[
            "name",
            "type",
            "length",
            "precision",
            "scale",
            "unique",
            "nullable",
        ],
        "ManyToOne" => &["targetEntity", "cascade", "fetch", "inversedBy"],
        "OneToMany" => &[
            "mappedBy",
            "targetEntity",
            "cascade",
            "fetch",
            "orphanRemoval",
            "indexBy",
        ],
        "OneToOne" => &[
            "targetEntity",
            "mappedBy",
            "inversedBy",
            "cascade",
            "fetch",
            "orphanRemoval",
        ],
        "ManyToMany" => &[
            "targetEntity",
            "mappedBy",
            "inversedBy",
            "cascade",
            "fetch",
            "orphanRemoval",
            "indexBy",
        ],
        "Entity" => &["repositoryClass", "readOnly"],
        "JoinColumn" => &[
            "name",
            "referencedColumnName",
            "unique",
            "nullable",
            "onDelete",
        ],
        "JoinTable" => &["name", "schema", "joinColumns", "inverseJoinColumns"],
        "GeneratedValue" => &["strategy"],
        "OrderBy" => &["value"],
        _ => &[],
    }
}

/// Returns the last `\`-separated segment of a class name.
#[must_use]
pub fn short_name(name: &str) -> &str {
    name.rsplit('\\').next().unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_types_constants() {
        assert_eq!(dbal_type_from_constant("STRING"), "string");
        assert_eq!(
            dbal_type_from_constant("DATETIME_IMMUTABLE"),
            "datetime_immutable"
        );
        assert_eq!(dbal_type_from_constant("DATE_MUTABLE"), "date");
        assert_eq!(dbal_type_from_constant("SIMPLE_ARRAY"), "simple_array");
    }

    #[test]
    fn compatibility_table_covers_core_types() {
        assert_eq!(compatible_php_types("integer"), Some(&["int"][..]));
        assert!(compatible_php_types("decimal")
            .is_some_and(|t| t.contains(&"string")));
        assert!(compatible_php_types("uuid").is_none());
    }

    #[test]
    fn every_compatible_type_is_known() {
        for ty in KNOWN_COLUMN_TYPES {
            if compatible_php_types(ty).is_some() {
                continue;
            }
            assert!(["object", "binary", "blob", "enum", "uuid", "ulid"].contains(ty));
        }
    }

    #[test]
    fn short_name_strips_namespace() {
        assert_eq!(short_name("Doctrine\\ORM\\Mapping\\Column"), "Column");
        assert_eq!(short_name("ORM\\Id"), "Id");
        assert_eq!(short_name("Id"), "Id");
    }
}
