/// The demonstrations in the order Space cycles through them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DemoKind {
    Clear,
    Poly,
    Color,
    Rotate,
    Shapes,
    Texture,
    Sprite,
    Font,
    Collision,
    Menu,
    Map,
    Particle,
}

impl DemoKind {
    pub const ALL: [DemoKind; 12] = [
        DemoKind::Clear,
        DemoKind::Poly,
        DemoKind::Color,
        DemoKind::Rotate,
        DemoKind::Shapes,
        DemoKind::Texture,
        DemoKind::Sprite,
        DemoKind::Font,
        DemoKind::Collision,
        DemoKind::Menu,
        DemoKind::Map,
        DemoKind::Particle,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// The following demo, wrapping from the last back to the first.
    pub fn next(self) -> DemoKind {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn name(self) -> &'static str {
        match self {
            DemoKind::Clear => "clear",
            DemoKind::Poly => "poly",
            DemoKind::Color => "color",
            DemoKind::Rotate => "rotate",
            DemoKind::Shapes => "shapes",
            DemoKind::Texture => "texture",
            DemoKind::Sprite => "sprite",
            DemoKind::Font => "font",
            DemoKind::Collision => "collision",
            DemoKind::Menu => "menu",
            DemoKind::Map => "map",
            DemoKind::Particle => "particle",
        }
    }

    pub fn from_name(name: &str) -> Option<DemoKind> {
        let name = name.trim();
        Self::ALL.into_iter().find(|kind| kind.name().eq_ignore_ascii_case(name))
    }
}

impl Default for DemoKind {
    fn default() -> Self {
        DemoKind::Particle
    }
}
