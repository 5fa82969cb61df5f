use bitflags::bitflags;

bitflags! {
    /// Derived caches that went stale since the last redraw.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Dirty: u32 {
        /// Pan, zoom or widget size changed
        const TRANSFORM = 1 << 0;

        /// Selection set changed, the outline must be extracted again
        const SELECTION = 1 << 1;

        /// Layer order, properties or raster content changed
        const LAYERS = 1 << 2;

        /// Current layer or frame index changed
        const CURRENT_CELL = 1 << 3;

        /// Post-effect offsets, flip or their scopes changed
        const POST_EFFECT = 1 << 4;

        /// Onion skin settings changed
        const ONION_SKIN = 1 << 5;

        /// Cursor or tool preview moved
        const OVERLAY = 1 << 6;

        /// Marching ants dash phase advanced
        const ANTS = 1 << 7;
    }
}

impl Dirty {
    /// Changes that invalidate the per-layer draw operations.
    pub fn affects_layers(self) -> bool {
        self.intersects(Dirty::TRANSFORM | Dirty::LAYERS | Dirty::CURRENT_CELL | Dirty::POST_EFFECT)
    }

    /// Changes that invalidate the onion skin pass.
    pub fn affects_onion_skin(self) -> bool {
        self.intersects(Dirty::TRANSFORM | Dirty::LAYERS | Dirty::CURRENT_CELL | Dirty::ONION_SKIN)
    }
}
