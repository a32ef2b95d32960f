//! Aggregate statistics over the review dataset.
//!
//! These back the charting endpoints: reviews per year, reviews per month
//! for recent years, genre popularity, and platform-family distribution.

use crate::types::*;
use rayon::prelude::*;
use std::collections::{BTreeMap, HashMap};

/// First release year included in the monthly breakdown.
pub const MONTHLY_SINCE_YEAR: i32 = 2014;

/// Number of genres returned by [`GameDataset::genre_popularity`].
pub const TOP_GENRES: usize = 15;

/// Spelling variants in the source data folded onto one display name.
pub const GENRE_ALIASES: [(&str, &str); 6] = [
    ("Role-playing (RPG)", "RPG"),
    ("Platformer", "Platform"),
    ("Sports", "Sport"),
    ("Simulator", "Simulation"),
    ("Card & Board Game", "Card & Board"),
    ("Fightings", "Fighting"),
];

/// Platform families used by the distribution chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlatformFamily {
    Pc,
    Nintendo,
    PlayStation,
    Xbox,
    Mobile,
    Sega,
    Other,
}

const PC: &[&str] = &["PC", "Macintosh", "Linux", "SteamOS", "Windows Surface"];
const NINTENDO: &[&str] = &[
    "Nintendo Switch",
    "Super NES",
    "Wii",
    "Nintendo 64",
    "Wii U",
    "Nintendo 3DS",
    "Nintendo DS",
    "NES",
    "Nintendo DSi",
    "3DS",
    "New Nintendo 3DS",
    "Nintendo 64DD",
    "GameCube",
];
const PLAYSTATION: &[&str] = &[
    "PlayStation 5",
    "PlayStation",
    "PlayStation 2",
    "PlayStation 3",
    "PlayStation 4",
    "PlayStation Portable",
    "PlayStation Vita",
];
const XBOX: &[&str] = &["Xbox Series X", "Xbox", "Xbox 360", "Xbox One"];
const MOBILE: &[&str] = &[
    "iPhone",
    "iPad",
    "Android",
    "Windows Phone",
    "iPod",
    "Pocket PC",
    "iOS (iPhone/iPad)",
];
const SEGA: &[&str] = &[
    "Genesis",
    "Sega CD",
    "Saturn",
    "Dreamcast",
    "Master System",
    "Sega 32X",
];

impl PlatformFamily {
    /// Classify a platform name. Matching is exact; unknown names are `Other`.
    pub fn classify(platform: &str) -> Self {
        let families = [
            (PC, PlatformFamily::Pc),
            (NINTENDO, PlatformFamily::Nintendo),
            (PLAYSTATION, PlatformFamily::PlayStation),
            (XBOX, PlatformFamily::Xbox),
            (MOBILE, PlatformFamily::Mobile),
            (SEGA, PlatformFamily::Sega),
        ];
        families
            .iter()
            .find(|(members, _)| members.contains(&platform))
            .map(|(_, family)| *family)
            .unwrap_or(PlatformFamily::Other)
    }
}

/// Map a raw genre tag to its display name.
pub fn normalize_genre(tag: &str) -> &str {
    GENRE_ALIASES
        .iter()
        .find(|(raw, _)| *raw == tag)
        .map(|(_, display)| *display)
        .unwrap_or(tag)
}

impl GameDataset {
    /// Review counts per release year, ascending by year.
    pub fn reviews_by_year(&self) -> Vec<YearCount> {
        let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
        for game in &self.games {
            *counts.entry(game.release_year).or_insert(0) += 1;
        }
        counts
            .into_iter()
            .map(|(release_year, count)| YearCount {
                release_year,
                count,
            })
            .collect()
    }

    /// Review counts per release month for games released in or after
    /// [`MONTHLY_SINCE_YEAR`], ascending by month. Records without a month
    /// are skipped.
    pub fn reviews_by_month(&self) -> Vec<MonthCount> {
        let mut counts: BTreeMap<u8, usize> = BTreeMap::new();
        for game in &self.games {
            if game.release_year < MONTHLY_SINCE_YEAR {
                continue;
            }
            if let Some(month) = game.release_month {
                *counts.entry(month).or_insert(0) += 1;
            }
        }
        counts
            .into_iter()
            .map(|(month, count)| MonthCount(month, count))
            .collect()
    }

    /// Average score and game count per genre, top [`TOP_GENRES`] by count.
    ///
    /// A game with several tags counts once towards each of them. Tags are
    /// folded through [`GENRE_ALIASES`] first. Ties on count are broken by
    /// genre name so the output is deterministic.
    pub fn genre_popularity(&self) -> Vec<GenreStats> {
        let totals: HashMap<String, (f64, usize)> = self
            .games
            .par_iter()
            .fold(HashMap::new, |mut acc: HashMap<String, (f64, usize)>, game| {
                for tag in &game.genres {
                    let entry = acc
                        .entry(normalize_genre(tag).to_string())
                        .or_insert((0.0, 0));
                    entry.0 += game.score;
                    entry.1 += 1;
                }
                acc
            })
            .reduce(HashMap::new, |mut left, right| {
                for (genre, (sum, count)) in right {
                    let entry = left.entry(genre).or_insert((0.0, 0));
                    entry.0 += sum;
                    entry.1 += count;
                }
                left
            });

        let mut stats: Vec<GenreStats> = totals
            .into_iter()
            .map(|(genre, (sum, count))| GenreStats {
                genre,
                average_score: sum / count as f64,
                num_games: count,
            })
            .collect();

        stats.sort_by(|a, b| {
            b.num_games
                .cmp(&a.num_games)
                .then_with(|| a.genre.cmp(&b.genre))
        });
        stats.truncate(TOP_GENRES);
        stats
    }

    /// Review counts per platform family for every release year present in
    /// the dataset, ascending by year.
    pub fn platform_distribution(&self) -> Vec<PlatformYearCounts> {
        let mut by_year: BTreeMap<i32, PlatformYearCounts> = BTreeMap::new();
        for game in &self.games {
            let row = by_year
                .entry(game.release_year)
                .or_insert_with(|| PlatformYearCounts {
                    release_year: game.release_year,
                    ..Default::default()
                });
            let slot = match PlatformFamily::classify(&game.platform) {
                PlatformFamily::Pc => &mut row.pc,
                PlatformFamily::Nintendo => &mut row.nintendo,
                PlatformFamily::PlayStation => &mut row.playstation,
                PlatformFamily::Xbox => &mut row.xbox,
                PlatformFamily::Mobile => &mut row.mobile,
                PlatformFamily::Sega => &mut row.sega,
                PlatformFamily::Other => &mut row.other,
            };
            *slot += 1;
        }
        by_year.into_values().collect()
    }
}
