use crate::element::{find_element, find_element_mut, Element};

/// A rooted element tree.
///
/// Elements are addressed either by id or by a path of child indices from
/// the root. Paths are only valid until the tree is next restructured.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Element,
}

impl Document {
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Element {
        &mut self.root
    }

    pub fn find(&self, id: &str) -> Option<&Element> {
        find_element(&self.root, id)
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut Element> {
        find_element_mut(&mut self.root, id)
    }

    /// Child-index path from the root to the element with `id`.
    /// The root itself has an empty path.
    pub fn path_to(&self, id: &str) -> Option<Vec<usize>> {
        let mut path = Vec::new();
        if path_to_element(&self.root, id, &mut path) {
            Some(path)
        } else {
            None
        }
    }

    pub fn get_path(&self, path: &[usize]) -> Option<&Element> {
        let mut current = &self.root;
        for &index in path {
            current = current.child_elements().get(index)?;
        }
        Some(current)
    }

    pub fn get_path_mut(&mut self, path: &[usize]) -> Option<&mut Element> {
        let mut current = &mut self.root;
        for &index in path {
            current = current.child_elements_mut()?.get_mut(index)?;
        }
        Some(current)
    }

    /// Elements from the root down to and including the element with `id`.
    /// Empty if no such element exists.
    pub fn ancestors(&self, id: &str) -> Vec<&Element> {
        let Some(path) = self.path_to(id) else {
            return Vec::new();
        };

        let mut chain = Vec::with_capacity(path.len() + 1);
        let mut current = &self.root;
        chain.push(current);
        for index in path {
            current = &current.child_elements()[index];
            chain.push(current);
        }
        chain
    }

    /// Nearest element with the given tag, starting at `id` itself and
    /// walking up towards the root.
    pub fn closest(&self, id: &str, tag: &str) -> Option<&Element> {
        self.ancestors(id).into_iter().rev().find(|el| el.is(tag))
    }

    /// Path of the nearest element with the given tag, starting at `id`
    /// itself and walking up towards the root.
    pub fn closest_path(&self, id: &str, tag: &str) -> Option<Vec<usize>> {
        let mut path = self.path_to(id)?;
        loop {
            if self.get_path(&path)?.is(tag) {
                return Some(path);
            }
            path.pop()?;
        }
    }

    /// All elements matching `pred`, in document order.
    pub fn query_all<F>(&self, pred: F) -> Vec<&Element>
    where
        F: Fn(&Element) -> bool,
    {
        let mut out = Vec::new();
        collect_matching(&self.root, &pred, &mut out);
        out
    }

    pub fn query_class(&self, class: &str) -> Vec<&Element> {
        self.query_all(|el| el.has_class(class))
    }
}

impl From<Element> for Document {
    fn from(root: Element) -> Self {
        Self::new(root)
    }
}

fn path_to_element(element: &Element, id: &str, path: &mut Vec<usize>) -> bool {
    if element.id == id {
        return true;
    }

    for (index, child) in element.child_elements().iter().enumerate() {
        path.push(index);
        if path_to_element(child, id, path) {
            return true;
        }
        path.pop();
    }

    false
}

fn collect_matching<'a, F>(element: &'a Element, pred: &F, out: &mut Vec<&'a Element>)
where
    F: Fn(&Element) -> bool,
{
    if pred(element) {
        out.push(element);
    }
    for child in element.child_elements() {
        collect_matching(child, pred, out);
    }
}
