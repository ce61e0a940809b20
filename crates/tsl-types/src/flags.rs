//! Semantic type flags.
//!
//! Each `TypeId` has a raw flag set describing its own kind. Unions do not
//! carry their members' flags; `type_queries::is_type_flag_set` aggregates
//! over union parts when a caller needs that.

use bitflags::bitflags;

bitflags! {
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct TypeFlags: u32 {
        const ANY = 1 << 0;
        const UNKNOWN = 1 << 1;
        const STRING = 1 << 2;
        const NUMBER = 1 << 3;
        const BOOLEAN = 1 << 4;
        const BIGINT = 1 << 5;
        const STRING_LITERAL = 1 << 6;
        const NUMBER_LITERAL = 1 << 7;
        const BOOLEAN_LITERAL = 1 << 8;
        const BIGINT_LITERAL = 1 << 9;
        const ENUM_LITERAL = 1 << 10;
        const ES_SYMBOL = 1 << 11;
        const UNIQUE_ES_SYMBOL = 1 << 12;
        const VOID = 1 << 13;
        const UNDEFINED = 1 << 14;
        const NULL = 1 << 15;
        const NEVER = 1 << 16;
        const TYPE_PARAMETER = 1 << 17;
        const OBJECT = 1 << 18;
        const UNION = 1 << 19;
        const INTERSECTION = 1 << 20;
        /// The `object` keyword type
        const NON_PRIMITIVE = 1 << 21;

        // === Composite masks ===

        const NULLABLE = Self::NULL.bits() | Self::UNDEFINED.bits();
        const LITERAL = Self::STRING_LITERAL.bits()
            | Self::NUMBER_LITERAL.bits()
            | Self::BIGINT_LITERAL.bits()
            | Self::BOOLEAN_LITERAL.bits();
        const STRING_LIKE = Self::STRING.bits() | Self::STRING_LITERAL.bits();
        const NUMBER_LIKE = Self::NUMBER.bits() | Self::NUMBER_LITERAL.bits();
        const BIGINT_LIKE = Self::BIGINT.bits() | Self::BIGINT_LITERAL.bits();
        const BOOLEAN_LIKE = Self::BOOLEAN.bits() | Self::BOOLEAN_LITERAL.bits();
        const ES_SYMBOL_LIKE = Self::ES_SYMBOL.bits() | Self::UNIQUE_ES_SYMBOL.bits();
        const DEFINITELY_FALSY = Self::LITERAL.bits()
            | Self::VOID.bits()
            | Self::UNDEFINED.bits()
            | Self::NULL.bits();
        /// Literal flags are included; callers exclude truthy literals first.
        const POSSIBLY_FALSY = Self::DEFINITELY_FALSY.bits()
            | Self::STRING.bits()
            | Self::NUMBER.bits()
            | Self::BIGINT.bits()
            | Self::BOOLEAN.bits();
        const ANY_OR_UNKNOWN = Self::ANY.bits() | Self::UNKNOWN.bits();
    }
}
