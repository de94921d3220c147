#[macro_export]
macro_rules! value_kind_registry_entries {
    ($macro:ident $(, @args $($args:tt)+ )?) => {
        $macro! {
            $(
                @args $($args)+;
            )?
            @entries
            (
                Array,
                label = "array",
                is_bare_numeric = false,
                bare_in_array_only = true
            ),
            (
                Bool,
                label = "bool",
                is_bare_numeric = true,
                bare_in_array_only = false
            ),
            (
                Bytes,
                label = "bytea",
                is_bare_numeric = false,
                bare_in_array_only = false
            ),
            (
                Enum,
                label = "enum",
                is_bare_numeric = false,
                bare_in_array_only = false
            ),
            (
                Float,
                label = "float",
                is_bare_numeric = true,
                bare_in_array_only = false
            ),
            (
                HStore,
                label = "hstore",
                is_bare_numeric = false,
                bare_in_array_only = false
            ),
            (
                Int,
                label = "int",
                is_bare_numeric = true,
                bare_in_array_only = false
            ),
            (
                Numeric,
                label = "numeric",
                is_bare_numeric = true,
                bare_in_array_only = false
            ),
            (
                Record,
                label = "record",
                is_bare_numeric = false,
                bare_in_array_only = false
            ),
            (
                Row,
                label = "row",
                is_bare_numeric = false,
                bare_in_array_only = false
            ),
            (
                Text,
                label = "text",
                is_bare_numeric = false,
                bare_in_array_only = false
            ),
            (
                Timestamp,
                label = "timestamp",
                is_bare_numeric = false,
                bare_in_array_only = true
            ),
        }
    };
}

#[macro_export]
macro_rules! value_kind_registry {
    ($macro:ident) => {
        $crate::value_kind_registry_entries!($macro)
    };
    ($macro:ident, $($args:tt)+) => {
        $crate::value_kind_registry_entries!($macro, @args $($args)+)
    };
}

macro_rules! metadata_from_registry {
    ( @args $kind:expr; @entries $( ($value:ident, label = $label:expr, is_bare_numeric = $is_bare_numeric:expr, bare_in_array_only = $bare_in_array_only:expr) ),* $(,)? ) => {
        match $kind {
            $(
                $crate::ValueKind::$value => $crate::KindMetadata {
                    label: $label,
                    is_bare_numeric: $is_bare_numeric,
                    bare_in_array_only: $bare_in_array_only,
                },
            )*
        }
    };
}

macro_rules! all_kinds_from_registry {
    ( @entries $( ($value:ident, label = $label:expr, is_bare_numeric = $is_bare_numeric:expr, bare_in_array_only = $bare_in_array_only:expr) ),* $(,)? ) => {
        [ $( $crate::ValueKind::$value ),* ]
    };
    ( @args $($ignore:tt)*; @entries $( ($value:ident, label = $label:expr, is_bare_numeric = $is_bare_numeric:expr, bare_in_array_only = $bare_in_array_only:expr) ),* $(,)? ) => {
        [ $( $crate::ValueKind::$value ),* ]
    };
}
