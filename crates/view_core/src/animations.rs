use tracing::debug;

use crate::surface::{ObserverKind, PageSurface};

pub const REVEAL_SELECTOR: &str = ".skill-category, .project-card, .experience-card";
pub const LAZY_IMAGE_SELECTOR: &str = "img[data-src]";
pub const LAZY_CLASS: &str = "lazy";

pub fn prepare_reveal<S: PageSurface>(page: &mut S) -> usize {
    let targets = page.query_selector_all(REVEAL_SELECTOR);
    for node in &targets {
        page.set_style(node, "opacity", "0");
        page.set_style(node, "transform", "translateY(30px)");
        page.set_style(node, "transition", "opacity 0.8s ease, transform 0.8s ease");
        page.observe(node, ObserverKind::Reveal);
    }
    targets.len()
}

pub fn prepare_lazy_images<S: PageSurface>(page: &mut S) -> usize {
    let images = page.query_selector_all(LAZY_IMAGE_SELECTOR);
    for image in &images {
        page.observe(image, ObserverKind::LazyImage);
    }
    images.len()
}

pub fn on_intersection<S: PageSurface>(
    page: &mut S,
    kind: ObserverKind,
    target: &S::Node,
    intersecting: bool,
) {
    if !intersecting {
        return;
    }
    match kind {
        ObserverKind::Reveal => {
            page.set_style(target, "opacity", "1");
            page.set_style(target, "transform", "translateY(0)");
        }
        ObserverKind::LazyImage => {
            match page.attribute(target, "data-src").filter(|src| !src.is_empty()) {
                Some(src) => {
                    debug!(src = %src, "loading lazy image");
                    page.set_attribute(target, "src", &src);
                    page.set_class(target, LAZY_CLASS, false);
                }
                None => debug!("lazy image without data-src"),
            }
            page.unobserve(target, ObserverKind::LazyImage);
        }
    }
}

#[cfg(test)]
#[path = "tests/animation_tests.rs"]
mod tests;
