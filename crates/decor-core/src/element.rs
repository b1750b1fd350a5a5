use fnv::FnvHashMap;
use glam::Vec3;

/// Fixed random parameters of one decorative element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DecorativeElement {
    pub base_position: Vec3,
    pub random_phase: f32,
    pub amplitude: f32,
    pub base_scale: f32,
    pub opacity: f32,
}

/// Key from a render node back to its element. Lookup only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u32);

/// Owns every element of a field, keyed by id and kept in creation order.
///
/// Built once by the layout generator. There is no insert or remove after
/// construction, so `len()` is fixed for the store's lifetime.
#[derive(Clone, Debug, Default)]
pub struct ElementStore {
    elements: FnvHashMap<ElementId, DecorativeElement>,
    order: Vec<ElementId>,
}

impl ElementStore {
    pub(crate) fn from_elements(elements: Vec<DecorativeElement>) -> Self {
        let mut map = FnvHashMap::with_capacity_and_hasher(elements.len(), Default::default());
        let mut order = Vec::with_capacity(elements.len());
        for (i, el) in elements.into_iter().enumerate() {
            let id = ElementId(i as u32);
            map.insert(id, el);
            order.push(id);
        }
        Self {
            elements: map,
            order,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    #[inline]
    pub fn get(&self, id: ElementId) -> Option<&DecorativeElement> {
        self.elements.get(&id)
    }

    pub fn ids(&self) -> &[ElementId] {
        &self.order
    }

    pub fn iter(&self) -> impl Iterator<Item = (ElementId, &DecorativeElement)> + '_ {
        self.order
            .iter()
            .filter_map(move |id| self.elements.get(id).map(|el| (*id, el)))
    }
}
