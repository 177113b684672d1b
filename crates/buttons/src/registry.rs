use crate::spec::ButtonSpec;

/// Ordered list of declared buttons.
///
/// The registry is only ever cleared wholesale or appended to; specs are
/// never edited in place.  Every mutation bumps [`generation`](Self::generation),
/// which lets bar caches detect that indices they hold may point at a
/// different button now.
#[derive(Debug, Default)]
pub struct ButtonRegistry {
    specs:      Vec<ButtonSpec>,
    generation: u64,
}

impl ButtonRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every button.  Called when a configuration reload begins.
    pub fn clear(&mut self) {
        self.specs.clear();
        self.generation += 1;
    }

    pub fn push(&mut self, spec: ButtonSpec) {
        tracing::debug!(
            index = self.specs.len(),
            width = spec.width,
            height = spec.height,
            "registered bar button"
        );
        self.specs.push(spec);
        self.generation += 1;
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ButtonSpec> {
        self.specs.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ButtonSpec> {
        self.specs.iter()
    }

    pub fn as_slice(&self) -> &[ButtonSpec] {
        &self.specs
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}
