use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::errors::UnknownTable;

/// The tables of the movies catalogue.
///
/// Source and destination share table names; only the destination lives in a
/// dedicated schema.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    Genre,
    Person,
    FilmWork,
    GenreFilmWork,
    PersonFilmWork,
}

impl Table {
    /// Parents come before the tables whose foreign keys point at them.
    pub const LOAD_ORDER: [Table; 5] = [
        Table::Genre,
        Table::Person,
        Table::FilmWork,
        Table::GenreFilmWork,
        Table::PersonFilmWork,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Table::Genre => "genre",
            Table::Person => "person",
            Table::FilmWork => "film_work",
            Table::GenreFilmWork => "genre_film_work",
            Table::PersonFilmWork => "person_film_work",
        }
    }

    /// Tables referenced by this table's foreign keys.
    pub fn parents(&self) -> &'static [Table] {
        match self {
            Table::Genre | Table::Person | Table::FilmWork => &[],
            Table::GenreFilmWork => &[Table::Genre, Table::FilmWork],
            Table::PersonFilmWork => &[Table::Person, Table::FilmWork],
        }
    }

    /// Position of the table in [`Table::LOAD_ORDER`].
    pub fn load_rank(&self) -> usize {
        match self {
            Table::Genre => 0,
            Table::Person => 1,
            Table::FilmWork => 2,
            Table::GenreFilmWork => 3,
            Table::PersonFilmWork => 4,
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Table {
    type Err = UnknownTable;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Table::LOAD_ORDER
            .iter()
            .copied()
            .find(|table| table.name() == s.trim())
            .ok_or_else(|| UnknownTable(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parents_load_before_children() {
        for table in Table::LOAD_ORDER {
            for parent in table.parents() {
                assert!(
                    parent.load_rank() < table.load_rank(),
                    "{parent} must load before {table}"
                );
            }
        }
    }

    #[test]
    fn load_rank_matches_load_order() {
        for (index, table) in Table::LOAD_ORDER.iter().enumerate() {
            assert_eq!(table.load_rank(), index);
        }
    }

    #[test]
    fn parses_known_names() {
        assert_eq!("film_work".parse::<Table>(), Ok(Table::FilmWork));
        assert_eq!(" person_film_work ".parse::<Table>(), Ok(Table::PersonFilmWork));
    }

    #[test]
    fn rejects_unknown_names() {
        assert_eq!(
            "movies".parse::<Table>(),
            Err(UnknownTable("movies".to_string()))
        );
    }
}
