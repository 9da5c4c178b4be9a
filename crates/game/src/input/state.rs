use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    S,
    ArrowUp,
    ArrowDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding {
    pub up: Key,
    pub down: Key,
}

impl KeyBinding {
    pub const LEFT: Self = Self {
        up: Key::W,
        down: Key::S,
    };

    pub const RIGHT: Self = Self {
        up: Key::ArrowUp,
        down: Key::ArrowDown,
    };
}

#[derive(Debug, Clone, Default)]
pub struct InputState {
    keys: HashMap<Key, bool>,
    pointer: Option<f32>,
}

impl InputState {
    pub fn set_key(&mut self, key: Key, pressed: bool) {
        self.keys.insert(key, pressed);
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.keys.get(&key).copied().unwrap_or(false)
    }

    pub fn set_pointer(&mut self, value: f32) {
        self.pointer = Some(value);
    }

    pub fn pointer(&self) -> Option<f32> {
        self.pointer
    }

    /// Signed control value for `binding`, or `None` when neither key is held.
    ///
    /// "down" is checked after "up" and overwrites it, so holding both gives
    /// `-magnitude` rather than cancelling out.
    pub fn axis(&self, binding: KeyBinding, magnitude: f32) -> Option<f32> {
        let up = self.is_held(binding.up);
        let down = self.is_held(binding.down);
        if !up && !down {
            return None;
        }

        let mut value = 0.0;
        if up {
            value = magnitude;
        }
        if down {
            value = -magnitude;
        }
        Some(value)
    }

    pub fn clear(&mut self) {
        self.keys.clear();
        self.pointer = None;
    }
}

/// Maps a viewport-relative pointer row onto `[-1, 1]`, top of the viewport
/// being `1`. Returns `None` when there is no viewport to map against.
pub fn normalize_pointer(client_y: f32, height: f32) -> Option<f32> {
    if height <= 0.0 || !client_y.is_finite() {
        return None;
    }

    let normalized = 1.0 - client_y / height;
    let mapped = (normalized - 0.5) * 2.0;
    Some(mapped.clamp(-1.0, 1.0))
}
