//! Rotating scenery shown behind the search form.

use rand::Rng;
use std::collections::VecDeque;
use std::time::Duration;

/// How long each scene stays up
pub const ROTATION_INTERVAL: Duration = Duration::from_secs(8);

/// Recently shown scenes that the next pick must avoid
pub const HISTORY_LEN: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneKind {
    /// Rugged, wide landscapes
    Wide,
    /// Close-up forest and detail shots
    Detail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scene {
    pub label: &'static str,
    pub kind: SceneKind,
    pub url: &'static str,
}

const fn scene(label: &'static str, kind: SceneKind, url: &'static str) -> Scene {
    Scene { label, kind, url }
}

pub const SCENES: [Scene; 14] = [
    scene("Untamed Horizons", SceneKind::Wide, "https://images.unsplash.com/photo-1469854523086-cc02fe5d8800"),
    scene("Silent Valleys", SceneKind::Wide, "https://images.unsplash.com/photo-1472214103451-9374bd1c798e"),
    scene("Coastal Edge", SceneKind::Wide, "https://images.unsplash.com/photo-1501785888041-af3ef285b470"),
    scene("Mountain Pass", SceneKind::Wide, "https://images.unsplash.com/photo-1454496522488-7a8e488e8606"),
    scene("The High Country", SceneKind::Wide, "https://images.unsplash.com/photo-1506905925346-21bda4d32df4"),
    scene("Endless Road", SceneKind::Wide, "https://images.unsplash.com/photo-1490659972355-613d038283a0"),
    scene("Red Rock Canyon", SceneKind::Wide, "https://images.unsplash.com/photo-1682687220742-aba13b6e50ba"),
    scene("Forest Floor", SceneKind::Detail, "https://images.unsplash.com/photo-1542202229-21728e6aaa73"),
    scene("Ancient Canopy", SceneKind::Detail, "https://images.unsplash.com/photo-1511497584788-876760111969"),
    scene("Hidden Grove", SceneKind::Detail, "https://images.unsplash.com/photo-1448375240586-dfd8d395ea6c"),
    scene("Morning Mist", SceneKind::Detail, "https://images.unsplash.com/photo-1504198266287-1659872e6590"),
    scene("Quiet Woods", SceneKind::Detail, "https://images.unsplash.com/photo-1473448912268-2022ce9509d8"),
    scene("Fern Valley", SceneKind::Detail, "https://images.unsplash.com/photo-1621849400072-f554417f7051"),
    scene("Deep Roots", SceneKind::Detail, "https://images.unsplash.com/photo-1425913397330-cf8af2ff40a1"),
];

/// Pick a random index in `0..pool_len` that is not in `history`, resampling
/// until one is found.
///
/// If the history already covers the whole pool any index is accepted.
pub fn pick_unrepeated<R: Rng + ?Sized>(rng: &mut R, pool_len: usize, history: &VecDeque<usize>) -> usize {
    assert!(pool_len > 0, "cannot pick from an empty pool");

    if (0..pool_len).all(|i| history.contains(&i)) {
        return rng.gen_range(0..pool_len);
    }

    loop {
        let idx = rng.gen_range(0..pool_len);
        if !history.contains(&idx) {
            return idx;
        }
    }
}

/// Active scene plus the one queued to replace it.
#[derive(Debug, Clone)]
pub struct Carousel {
    active: usize,
    next: usize,
    history: VecDeque<usize>,
}

impl Default for Carousel {
    fn default() -> Self {
        Self::new()
    }
}

impl Carousel {
    pub fn new() -> Self {
        Self {
            active: 0,
            next: 1,
            history: VecDeque::from(vec![0, 1]),
        }
    }

    pub fn active(&self) -> &'static Scene {
        &SCENES[self.active]
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn history(&self) -> &VecDeque<usize> {
        &self.history
    }

    /// Show the queued scene and queue a fresh one.
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.active = self.next;
        self.next = pick_unrepeated(rng, SCENES.len(), &self.history);

        self.history.push_back(self.next);
        if self.history.len() > HISTORY_LEN {
            self.history.pop_front();
        }
    }
}
