// Copyright 2025 the Textfit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `LayoutOracle` over live DOM elements.

use alloc::format;
use alloc::vec::Vec;

use kurbo::Size;
use textfit::{AlignmentStyles, LayoutOracle};
use wasm_bindgen::{JsCast as _, JsValue};
use web_sys::{CssStyleDeclaration, Document, HtmlElement, Window};

use crate::{
    ALIGN_VERT_CLASS, ALIGN_VERT_FLEX_CLASS, DomError, FITTED_CLASS, STYLESHEET, STYLESHEET_ID,
    parse_px, slots::Slots,
};

impl From<JsValue> for DomError {
    fn from(value: JsValue) -> Self {
        Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

/// Handle for an element registered with a [`DomOracle`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DomSurface(u32);

/// A [`LayoutOracle`] over DOM elements in the current document.
///
/// Elements are registered with [`DomOracle::surface`], which returns a
/// stable handle; registering the same element again returns the same handle.
/// [`DomOracle::release`] frees a handle once the element is no longer fitted.
#[derive(Clone, Debug)]
pub struct DomOracle {
    window: Window,
    document: Document,
    elements: Slots<HtmlElement>,
}

impl DomOracle {
    /// Creates an oracle for the global window's document.
    pub fn new() -> Result<Self, DomError> {
        let window = web_sys::window().ok_or(DomError::MissingWindow)?;
        let document = window.document().ok_or(DomError::MissingDocument)?;
        Ok(Self {
            window,
            document,
            elements: Slots::new(),
        })
    }

    /// Returns the handle for `element`, registering it on first use.
    pub fn surface(&mut self, element: &HtmlElement) -> DomSurface {
        let index = self.elements.insert(element);
        DomSurface(u32::try_from(index).unwrap_or(u32::MAX))
    }

    /// Unregisters a handle, returning its element.
    ///
    /// The handle may be reissued for another element, so call
    /// [`TextFitter::forget`](textfit::TextFitter::forget) for it first.
    pub fn release(&mut self, surface: DomSurface) -> Option<HtmlElement> {
        self.elements.remove(surface.0 as usize)
    }

    /// Registers every element matching `selector`, in document order.
    ///
    /// Matches that are not HTML elements (e.g. SVG nodes) are skipped.
    pub fn select(&mut self, selector: &str) -> Result<Vec<DomSurface>, DomError> {
        let list = self.document.query_selector_all(selector)?;
        let mut out = Vec::with_capacity(list.length() as usize);
        for i in 0..list.length() {
            if let Some(node) = list.item(i)
                && let Ok(element) = node.dyn_into::<HtmlElement>()
            {
                out.push(self.surface(&element));
            }
        }
        Ok(out)
    }

    /// Returns the element behind a handle.
    pub fn element(&self, surface: DomSurface) -> Option<&HtmlElement> {
        self.elements.get(surface.0 as usize)
    }

    fn el(&self, surface: &DomSurface) -> Result<&HtmlElement, DomError> {
        self.element(*surface)
            .ok_or(DomError::UnknownSurface(surface.0))
    }

    fn computed(&self, element: &HtmlElement) -> Result<CssStyleDeclaration, DomError> {
        self.window
            .get_computed_style(element)?
            .ok_or(DomError::MissingComputedStyle)
    }

    fn ensure_stylesheet(&self) -> Result<(), DomError> {
        if self.document.get_element_by_id(STYLESHEET_ID).is_some() {
            return Ok(());
        }
        let style = self.document.create_element("style")?;
        style.set_id(STYLESHEET_ID);
        style.set_text_content(Some(STYLESHEET));
        let body = self.document.body().ok_or(DomError::MissingDocument)?;
        body.append_child(&style)?;
        Ok(())
    }
}

impl LayoutOracle for DomOracle {
    type Surface = DomSurface;
    type Unit = HtmlElement;
    type Error = DomError;

    fn content_box(&mut self, surface: &DomSurface) -> Result<Size, DomError> {
        let el = self.el(surface)?;
        let rect = el.get_bounding_client_rect();
        let style = self.computed(el)?;
        let px = |name: &str| -> Result<f64, DomError> {
            Ok(parse_px(&style.get_property_value(name)?))
        };
        let width = rect.width() - px("padding-left")? - px("padding-right")?;
        let height = rect.height() - px("padding-top")? - px("padding-bottom")?;
        Ok(Size::new(width, height))
    }

    fn wrap_content(&mut self, surface: &DomSurface) -> Result<HtmlElement, DomError> {
        let el = self.el(surface)?.clone();
        if let Some(existing) = el.query_selector(&format!("span.{FITTED_CLASS}"))? {
            let existing = existing.dyn_into::<HtmlElement>().map_err(JsValue::from)?;
            // Span from an earlier fit: measure it without its fixed height.
            self.clear_vertical_alignment(surface, &existing)?;
            return Ok(existing);
        }
        let span = self
            .document
            .create_element("span")?
            .dyn_into::<HtmlElement>()
            .map_err(JsValue::from)?;
        span.set_class_name(FITTED_CLASS);
        // Inline-block so the span takes the size of its contents, even when
        // they are wrapped in block tags like <p>.
        span.style().set_property("display", "inline-block")?;
        span.set_inner_html(&el.inner_html());
        el.set_inner_html("");
        el.append_child(&span)?;
        Ok(span)
    }

    fn font_size(&mut self, unit: &HtmlElement) -> Result<f64, DomError> {
        Ok(parse_px(
            &self.computed(unit)?.get_property_value("font-size")?,
        ))
    }

    fn set_font_size(&mut self, unit: &HtmlElement, px: f64) -> Result<(), DomError> {
        unit.style().set_property("font-size", &format!("{px}px"))?;
        Ok(())
    }

    fn measure_box(&mut self, unit: &HtmlElement) -> Result<Size, DomError> {
        let rect = unit.get_bounding_client_rect();
        Ok(Size::new(rect.width(), rect.height()))
    }

    fn content_height(&mut self, unit: &HtmlElement) -> Result<f64, DomError> {
        Ok(f64::from(unit.scroll_height()))
    }

    fn set_wrapping(&mut self, surface: &DomSurface, allow: bool) -> Result<(), DomError> {
        let style = self.el(surface)?.style();
        if allow {
            style.remove_property("white-space")?;
        } else {
            style.set_property("white-space", "nowrap")?;
        }
        Ok(())
    }

    fn apply_alignment(
        &mut self,
        surface: &DomSurface,
        unit: &HtmlElement,
        styles: &AlignmentStyles,
    ) -> Result<(), DomError> {
        let el = self.el(surface)?;
        if styles.center_horizontally {
            el.style().set_property("text-align", "center")?;
            unit.style().set_property("text-align", "center")?;
        }
        let Some(vertical) = styles.vertical else {
            return Ok(());
        };

        self.ensure_stylesheet()?;
        if self.computed(el)?.get_property_value("position")? == "static" {
            el.style().set_property("position", "relative")?;
        }
        unit.class_list().add_1(ALIGN_VERT_CLASS)?;
        unit.style()
            .set_property("height", &format!("{}px", vertical.content_height))?;
        if vertical.flexbox {
            el.class_list().add_1(ALIGN_VERT_FLEX_CLASS)?;
        }
        Ok(())
    }

    fn clear_vertical_alignment(
        &mut self,
        surface: &DomSurface,
        unit: &HtmlElement,
    ) -> Result<(), DomError> {
        let el = self.el(surface)?;
        unit.class_list().remove_1(ALIGN_VERT_CLASS)?;
        unit.style().remove_property("height")?;
        el.class_list().remove_1(ALIGN_VERT_FLEX_CLASS)?;
        Ok(())
    }
}
