use std::hash::Hash;

use chrono::NaiveDateTime;
use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use tracing::debug;

use crate::core::{DateFormat, TimeScale};

/// Runtime metrics exposed by the time/position caches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PositionCacheStats {
    pub time_hits: u64,
    pub time_misses: u64,
    pub time_size: usize,
    pub pixel_hits: u64,
    pub pixel_misses: u64,
    pub pixel_size: usize,
}

/// Identity of the mapping every cached entry was computed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct MappingCacheKey {
    chart_start: NaiveDateTime,
    chart_end: NaiveDateTime,
    width_px: OrderedFloat<f64>,
}

impl MappingCacheKey {
    fn of(scale: TimeScale) -> Self {
        Self {
            chart_start: scale.chart_start(),
            chart_end: scale.chart_end(),
            width_px: OrderedFloat(scale.width_px()),
        }
    }
}

/// Bounded memo table evicting the oldest inserted key first.
#[derive(Debug)]
struct FifoCache<K, V> {
    entries: IndexMap<K, V>,
    hits: u64,
    misses: u64,
}

impl<K, V> Default for FifoCache<K, V> {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
            hits: 0,
            misses: 0,
        }
    }
}

impl<K: Hash + Eq, V: Copy> FifoCache<K, V> {
    const MAX_ENTRIES: usize = 1000;

    fn get(&mut self, key: &K) -> Option<V> {
        let value = self.entries.get(key).copied();
        if value.is_some() {
            self.hits = self.hits.saturating_add(1);
        }
        value
    }

    fn insert(&mut self, key: K, value: V) {
        self.misses = self.misses.saturating_add(1);
        if self.entries.len() >= Self::MAX_ENTRIES {
            self.entries.shift_remove_index(0);
        }
        self.entries.insert(key, value);
    }

    fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Memoizing time↔pixel mapper for one chart.
///
/// Both directions cache by the literal input. Changing the chart span or
/// width drops both caches at once; changing the date format drops only the
/// pixel→time side, since that direction is normalized through the format.
#[derive(Debug)]
pub struct TimePositionMapper {
    scale: TimeScale,
    date_format: DateFormat,
    key: MappingCacheKey,
    time_to_pixel: FifoCache<NaiveDateTime, f64>,
    pixel_to_time: FifoCache<OrderedFloat<f64>, NaiveDateTime>,
}

impl TimePositionMapper {
    #[must_use]
    pub fn new(scale: TimeScale, date_format: DateFormat) -> Self {
        Self {
            scale,
            date_format,
            key: MappingCacheKey::of(scale),
            time_to_pixel: FifoCache::default(),
            pixel_to_time: FifoCache::default(),
        }
    }

    #[must_use]
    pub fn scale(&self) -> TimeScale {
        self.scale
    }

    #[must_use]
    pub fn date_format(&self) -> &DateFormat {
        &self.date_format
    }

    pub fn set_scale(&mut self, scale: TimeScale) {
        self.scale = scale;
        let key = MappingCacheKey::of(scale);
        if key != self.key {
            debug!(
                chart_start = %scale.chart_start(),
                chart_end = %scale.chart_end(),
                width_px = scale.width_px(),
                "position caches invalidated"
            );
            self.key = key;
            self.clear();
        }
    }

    pub fn set_date_format(&mut self, date_format: DateFormat) {
        if date_format != self.date_format {
            self.date_format = date_format;
            self.pixel_to_time.clear();
        }
    }

    pub fn time_to_pixel(&mut self, time: NaiveDateTime) -> f64 {
        if let Some(pixel) = self.time_to_pixel.get(&time) {
            return pixel;
        }
        let pixel = self.scale.time_to_pixel(time);
        self.time_to_pixel.insert(time, pixel);
        pixel
    }

    /// Maps a pixel offset to a time truncated to the date format's resolution.
    pub fn pixel_to_time(&mut self, pixel: f64) -> NaiveDateTime {
        let key = OrderedFloat(pixel);
        if let Some(time) = self.pixel_to_time.get(&key) {
            return time;
        }
        let time = self.date_format.normalize(self.scale.pixel_to_time(pixel));
        self.pixel_to_time.insert(key, time);
        time
    }

    /// Same as [`Self::pixel_to_time`], rendered with the date format.
    pub fn pixel_to_time_label(&mut self, pixel: f64) -> String {
        let time = self.pixel_to_time(pixel);
        self.date_format.format(time)
    }

    pub fn clear(&mut self) {
        self.time_to_pixel.clear();
        self.pixel_to_time.clear();
    }

    #[must_use]
    pub fn stats(&self) -> PositionCacheStats {
        PositionCacheStats {
            time_hits: self.time_to_pixel.hits,
            time_misses: self.time_to_pixel.misses,
            time_size: self.time_to_pixel.entries.len(),
            pixel_hits: self.pixel_to_time.hits,
            pixel_misses: self.pixel_to_time.misses,
            pixel_size: self.pixel_to_time.entries.len(),
        }
    }
}
