use std::time::{Duration, Instant};

use crate::types::CarouselImage;

/// Auto-advancing rotation over a fixed image set.
///
/// The timer only runs while there is at least one image; `tick` is driven
/// by the event loop's tick events.
#[derive(Debug, Clone)]
pub struct Carousel {
    images: Vec<CarouselImage>,
    index: usize,
    interval: Duration,
    next_advance: Option<Instant>,
}

impl Carousel {
    pub fn new(images: Vec<CarouselImage>, interval: Duration) -> Self {
        let mut carousel = Self {
            images: Vec::new(),
            index: 0,
            interval,
            next_advance: None,
        };
        carousel.set_images(images, Instant::now());
        carousel
    }

    /// Replace the image set. Resets to the first slide; an empty set (or a
    /// zero interval) tears the timer down.
    pub fn set_images(&mut self, images: Vec<CarouselImage>, now: Instant) {
        self.images = images;
        self.index = 0;
        self.next_advance = if self.images.is_empty() || self.interval.is_zero() {
            None
        } else {
            Some(now + self.interval)
        };
    }

    pub fn advance(&mut self) {
        if self.images.is_empty() {
            return;
        }
        self.index = (self.index + 1) % self.images.len();
    }

    /// Advance once per elapsed interval. Returns true if any interval elapsed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(mut due) = self.next_advance else {
            return false;
        };
        let mut advanced = false;
        while now >= due {
            self.advance();
            advanced = true;
            due += self.interval;
        }
        self.next_advance = Some(due);
        advanced
    }

    pub fn is_running(&self) -> bool {
        self.next_advance.is_some()
    }

    pub fn current(&self) -> Option<&CarouselImage> {
        self.images.get(self.index)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::artwork_url;

    const BASE: &str = "https://img.example/art";

    fn images(ids: &[u32]) -> Vec<CarouselImage> {
        ids.iter()
            .map(|&id| CarouselImage::new(id, artwork_url(BASE, id)))
            .collect()
    }

    #[test]
    fn advance_wraps_around() {
        let mut c = Carousel::new(images(&[25, 6, 143]), Duration::from_secs(5));
        assert_eq!(c.index(), 0);
        c.advance();
        c.advance();
        assert_eq!(c.index(), 2);
        c.advance();
        assert_eq!(c.index(), 0);
        assert_eq!(c.current().map(|i| i.id), Some(25));
    }

    #[test]
    fn index_never_passes_the_end() {
        let mut c = Carousel::new(images(&[25, 6, 143, 150, 249]), Duration::from_secs(5));
        for _ in 0..23 {
            c.advance();
            assert!(c.index() < c.len());
            assert!(c.current().is_some());
        }
    }

    #[test]
    fn tick_advances_once_per_interval() {
        let interval = Duration::from_secs(5);
        let start = Instant::now();
        let mut c = Carousel::new(images(&[1, 2, 3]), interval);
        c.set_images(images(&[1, 2, 3]), start);

        assert!(!c.tick(start + Duration::from_secs(4)));
        assert_eq!(c.index(), 0);

        assert!(c.tick(start + Duration::from_secs(5)));
        assert_eq!(c.index(), 1);

        // Not due again until 10s
        assert!(!c.tick(start + Duration::from_secs(9)));
        assert_eq!(c.index(), 1);

        // A long stall catches up one slide per missed interval
        assert!(c.tick(start + Duration::from_secs(20)));
        assert_eq!(c.index(), (1 + 3) % 3);
    }

    #[test]
    fn empty_set_stops_the_timer() {
        let mut c = Carousel::new(images(&[1, 2]), Duration::from_secs(5));
        assert!(c.is_running());

        let now = Instant::now();
        c.set_images(Vec::new(), now);
        assert!(!c.is_running());
        assert!(c.current().is_none());
        assert!(!c.tick(now + Duration::from_secs(60)));
        c.advance();
        assert_eq!(c.index(), 0);
    }

    #[test]
    fn new_images_restart_from_first_slide() {
        let now = Instant::now();
        let mut c = Carousel::new(images(&[1, 2, 3]), Duration::from_secs(5));
        c.advance();
        c.set_images(images(&[7, 8]), now);
        assert_eq!(c.index(), 0);
        assert!(c.is_running());
        assert_eq!(c.current().map(|i| i.id), Some(7));
    }

    #[test]
    fn starts_stopped_when_empty() {
        let c = Carousel::new(Vec::new(), Duration::from_secs(5));
        assert!(!c.is_running());
        assert!(c.is_empty());
    }
}
