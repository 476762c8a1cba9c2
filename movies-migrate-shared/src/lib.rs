//! # Movies Migrate Shared
//! Record types for the movies catalogue (genres, persons, film works and their
//! join tables), the untyped row representation read from the source, and the
//! row mapper that turns one into the other.
pub mod errors;
pub mod mapper;
pub mod types;

pub use errors::{MappingError, UnknownTable};
pub use types::{
    Field, FilmworkType, Filmwork, Genre, GenreFilmwork, Person, PersonFilmwork, RawRow, Record,
    SourceValue, SqlValue, Table, ValueKind,
};
