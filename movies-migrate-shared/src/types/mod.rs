mod film_work;
mod genre;
mod genre_film_work;
mod person;
mod person_film_work;
mod raw_row;
mod record;
mod table;
mod value;

pub use film_work::{Filmwork, FilmworkType, RATING_MAX, RATING_MIN};
pub use genre::Genre;
pub use genre_film_work::GenreFilmwork;
pub use person::Person;
pub use person_film_work::PersonFilmwork;
pub use raw_row::RawRow;
pub use record::Record;
pub use table::Table;
pub use value::{Field, SourceValue, SqlValue, ValueKind};
