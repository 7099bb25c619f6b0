use crate::error::{Error, Result};
use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};
use std::sync::atomic::{AtomicU32, Ordering};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

static NEXT_REGISTRY: AtomicU32 = AtomicU32::new(0);

/// A handle naming a reference frame, a point, or an offset frame.
///
/// Handles are handed out by a [`FrameRegistry`] and are cheap to copy and compare: two handles
/// are equal exactly when they were interned under the same name in the same registry. Handles
/// from different registries never compare equal, even if they were interned under the same
/// name.
///
/// Every quantity in this crate carries a handful of these as tags (eg, the "measured-in" and
/// "expressed-in" frames of an angular velocity), and every operation that combines quantities
/// checks those tags before doing any math.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FrameId {
    registry: u32,
    index: u32,
}

impl FrameId {
    /// Returns the position of this handle in its registry's arena.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index as usize
    }
}

impl Display for FrameId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index)
    }
}

/// What a [`FrameId`] names.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FrameKind {
    /// A reference frame, eg a body frame `S` or the world frame `W`.
    Frame,
    /// A point fixed on the frame `on`, eg `So` (the origin of `S`) or `Sq`.
    Point { on: FrameId },
    /// A frame aligned with `base` whose origin is translationally offset from the origin of
    /// `base`, eg `Sa`. An offset frame is also its own origin point.
    OffsetFrame { base: FrameId },
}

impl Display for FrameKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            FrameKind::Frame => write!(f, "frame"),
            FrameKind::Point { on } => write!(f, "point on {on}"),
            FrameKind::OffsetFrame { base } => write!(f, "offset frame of {base}"),
        }
    }
}

#[derive(Clone, Debug)]
struct Entry {
    name: String,
    kind: FrameKind,
}

/// Interns frame and point names into [`FrameId`] handles.
///
/// Names follow the monogram convention: frames are upper-case (`W`, `S`), points and offset
/// frames append a lower-case suffix to the frame they are fixed on (`So`, `Sq`, `Sa`).
/// Interning is idempotent: asking for a name that already exists returns the existing handle.
/// A name keeps the kind it was first interned with, so asking for the point `Sq` when `Sq` is
/// already a frame (or the point of another frame) is an [`Error::KindMismatch`].
///
/// ```rust
/// use kinemono::FrameRegistry;
///
/// let mut frames = FrameRegistry::new();
/// let world = frames.frame("W");
/// let body = frames.frame("S");
/// let body_origin = frames.origin(body)?;
/// let tip = frames.point(body, "q")?;
///
/// assert_eq!(frames.name(body_origin), Some("So"));
/// assert_eq!(frames.name(tip), Some("Sq"));
/// assert_eq!(frames.body_of(tip), Some(body));
/// assert_eq!(frames.frame("W"), world);
/// # Ok::<(), kinemono::Error>(())
/// ```
#[derive(Debug)]
pub struct FrameRegistry {
    id: u32,
    entries: Vec<Entry>,
    by_name: HashMap<String, FrameId>,
}

impl Default for FrameRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameRegistry {
    /// Constructs an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: NEXT_REGISTRY.fetch_add(1, Ordering::Relaxed),
            entries: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    fn intern(&mut self, name: String, kind: FrameKind) -> Result<FrameId> {
        let Some(&id) = self.by_name.get(&name) else {
            return Ok(self.push(name, kind));
        };
        let existing = self.entries[id.index()].kind;
        if existing != kind {
            tracing::debug!(%name, ?kind, ?existing, "rejected re-interning as another kind");
            return Err(Error::KindMismatch {
                id,
                requested: kind,
                existing,
            });
        }
        Ok(id)
    }

    fn push(&mut self, name: String, kind: FrameKind) -> FrameId {
        let id = FrameId {
            registry: self.id,
            index: u32::try_from(self.entries.len()).expect("fewer than 2^32 interned frames"),
        };
        tracing::trace!(%name, ?kind, index = id.index, "interned frame");
        self.by_name.insert(name.clone(), id);
        self.entries.push(Entry { name, kind });
        id
    }

    fn entry(&self, id: FrameId) -> Result<&Entry> {
        if id.registry != self.id {
            return Err(Error::UnknownFrame { id });
        }
        self.entries
            .get(id.index())
            .ok_or(Error::UnknownFrame { id })
    }

    /// Interns a reference frame called `name`.
    ///
    /// If `name` is already interned, its existing handle is returned, whatever kind it names.
    pub fn frame(&mut self, name: impl Into<String>) -> FrameId {
        let name = name.into();
        match self.by_name.get(&name) {
            Some(&id) => id,
            None => self.push(name, FrameKind::Frame),
        }
    }

    /// Interns the point `{frame}{suffix}` fixed on `frame`.
    ///
    /// Returns [`Error::UnknownFrame`] if `frame` was not interned by this registry, and
    /// [`Error::KindMismatch`] if the name is already taken by something other than that point.
    pub fn point(&mut self, frame: FrameId, suffix: &str) -> Result<FrameId> {
        let name = format!("{}{suffix}", self.entry(frame)?.name);
        self.intern(name, FrameKind::Point { on: frame })
    }

    /// Interns the offset frame `{frame}{suffix}`, aligned with `frame`.
    ///
    /// Returns [`Error::UnknownFrame`] if `frame` was not interned by this registry, and
    /// [`Error::KindMismatch`] if the name is already taken by something other than that offset
    /// frame.
    pub fn offset_frame(&mut self, frame: FrameId, suffix: &str) -> Result<FrameId> {
        let name = format!("{}{suffix}", self.entry(frame)?.name);
        self.intern(name, FrameKind::OffsetFrame { base: frame })
    }

    /// Interns the origin point of `frame` (`So` for a frame `S`).
    ///
    /// An offset frame is its own origin, and so is a point. Fails like [`FrameRegistry::point`]
    /// does, eg if `So` was interned as a frame, so that the returned handle always satisfies
    /// [`FrameRegistry::is_origin_of`].
    pub fn origin(&mut self, frame: FrameId) -> Result<FrameId> {
        let kind = self.entry(frame)?.kind;
        match kind {
            FrameKind::Frame => self.point(frame, "o"),
            FrameKind::Point { .. } | FrameKind::OffsetFrame { .. } => Ok(frame),
        }
    }

    /// Returns the handle previously interned under `name`, if any.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<FrameId> {
        self.by_name.get(name).copied()
    }

    /// Returns the name `id` was interned under.
    #[must_use]
    pub fn name(&self, id: FrameId) -> Option<&str> {
        self.entry(id).ok().map(|entry| entry.name.as_str())
    }

    /// Returns what kind of thing `id` names.
    #[must_use]
    pub fn kind(&self, id: FrameId) -> Option<FrameKind> {
        self.entry(id).ok().map(|entry| entry.kind)
    }

    /// Returns the frame that `id` is rigidly attached to.
    ///
    /// For a frame that's the frame itself, for a point it is the frame it is fixed on, and for
    /// an offset frame it is the base frame it is aligned with.
    #[must_use]
    pub fn body_of(&self, id: FrameId) -> Option<FrameId> {
        match self.kind(id)? {
            FrameKind::Frame => Some(id),
            FrameKind::Point { on } => Some(on),
            FrameKind::OffsetFrame { base } => Some(base),
        }
    }

    /// Returns `true` if `point` is the origin of `frame` as interned by [`FrameRegistry::origin`].
    #[must_use]
    pub fn is_origin_of(&self, point: FrameId, frame: FrameId) -> bool {
        if point == frame {
            return matches!(
                self.kind(frame),
                Some(FrameKind::OffsetFrame { .. } | FrameKind::Point { .. })
            );
        }
        match (self.kind(point), self.name(frame)) {
            (Some(FrameKind::Point { on }), Some(frame_name)) if on == frame => self
                .name(point)
                .and_then(|name| name.strip_prefix(frame_name))
                .is_some_and(|suffix| suffix == "o"),
            _ => false,
        }
    }

    /// Returns the name of `id`, or [`Error::UnknownFrame`] if this registry didn't intern it.
    pub(crate) fn require_name(&self, id: FrameId) -> Result<&str> {
        self.entry(id).map(|entry| entry.name.as_str())
    }

    /// Returns the number of interned handles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been interned yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_is_idempotent() {
        let mut frames = FrameRegistry::new();
        let s = frames.frame("S");
        let m = frames.frame("M");
        assert_ne!(s, m);
        assert_eq!(frames.frame("S"), s);
        assert_eq!(frames.len(), 2);
        assert_eq!(frames.lookup("M"), Some(m));
        assert_eq!(frames.lookup("N"), None);
    }

    #[test]
    fn points_and_offset_frames_are_named_after_their_frame() {
        let mut frames = FrameRegistry::new();
        let s = frames.frame("S");
        let so = frames.origin(s).unwrap();
        let sq = frames.point(s, "q").unwrap();
        let sa = frames.offset_frame(s, "a").unwrap();

        assert_eq!(frames.name(so), Some("So"));
        assert_eq!(frames.name(sq), Some("Sq"));
        assert_eq!(frames.name(sa), Some("Sa"));
        assert_eq!(frames.kind(sq), Some(FrameKind::Point { on: s }));
        assert_eq!(frames.kind(sa), Some(FrameKind::OffsetFrame { base: s }));
        assert_eq!(frames.body_of(sa), Some(s));
        assert_eq!(frames.body_of(s), Some(s));
        assert_eq!(frames.origin(s).unwrap(), so);
    }

    #[test]
    fn origin_detection() {
        let mut frames = FrameRegistry::new();
        let s = frames.frame("S");
        let so = frames.origin(s).unwrap();
        let sq = frames.point(s, "q").unwrap();
        let sa = frames.offset_frame(s, "a").unwrap();

        assert!(frames.is_origin_of(so, s));
        assert!(!frames.is_origin_of(sq, s));
        assert!(!frames.is_origin_of(s, s));
        assert_eq!(frames.origin(sa).unwrap(), sa);
        assert!(frames.is_origin_of(sa, sa));
    }

    #[test]
    fn names_keep_their_kind() {
        let mut frames = FrameRegistry::new();
        let s = frames.frame("S");
        let so_frame = frames.frame("So");
        let sq = frames.point(s, "q").unwrap();

        assert_eq!(
            frames.origin(s),
            Err(Error::KindMismatch {
                id: so_frame,
                requested: FrameKind::Point { on: s },
                existing: FrameKind::Frame,
            })
        );
        assert_eq!(
            frames.offset_frame(s, "q"),
            Err(Error::KindMismatch {
                id: sq,
                requested: FrameKind::OffsetFrame { base: s },
                existing: FrameKind::Point { on: s },
            })
        );

        // `ABq` can be spelled as a point of `A` or of `AB`, but is only one of them
        let a = frames.frame("A");
        let ab = frames.frame("AB");
        let abq = frames.point(ab, "q").unwrap();
        let a_bq = frames.point(a, "Bq");
        assert_eq!(
            a_bq,
            Err(Error::KindMismatch {
                id: abq,
                requested: FrameKind::Point { on: a },
                existing: FrameKind::Point { on: ab },
            })
        );

        // a frame lookup by name hands back whatever is there
        assert_eq!(frames.frame("Sq"), sq);
        assert_eq!(frames.point(s, "q"), Ok(sq));
        assert_eq!(frames.len(), 6);
    }

    #[test]
    fn handles_do_not_cross_registries() {
        let mut a = FrameRegistry::new();
        let mut b = FrameRegistry::new();
        let s_in_a = a.frame("S");
        let s_in_b = b.frame("S");

        assert_ne!(s_in_a, s_in_b);
        assert_eq!(b.name(s_in_a), None);
        assert_eq!(
            b.point(s_in_a, "q"),
            Err(Error::UnknownFrame { id: s_in_a })
        );
    }

    #[test]
    fn display_is_the_arena_index() {
        let mut frames = FrameRegistry::new();
        frames.frame("W");
        let s = frames.frame("S");
        assert_eq!(s.to_string(), "#1");
        assert_eq!(s.index(), 1);
    }
}
