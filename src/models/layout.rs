use crate::driver::Locator;

/// How a site's markup encodes strain, potency and brand for one card.
#[derive(Debug, Clone, Copy)]
pub enum DetailShape {
    /// Strain and THC live in one delimited string ("Indica • THC: 28.1%"),
    /// brand in its own element.
    Composite {
        brand: &'static str,
        detail: &'static str,
    },
    /// Strain, potency and brand are separate elements.
    Discrete {
        brand: &'static str,
        strain: &'static str,
        potency: &'static str,
    },
}

/// Structural rules for extracting records from one site's markup shape.
/// Static data, never mutated at runtime; callers pick a descriptor and the
/// extractor handles both shapes behind it.
#[derive(Debug, Clone, Copy)]
pub struct LayoutDescriptor {
    /// Embedded catalog surface to descend into before extraction.
    pub frame: Option<&'static str>,
    /// Age-verification confirm control, when the site shows one.
    pub age_gate: Option<Locator>,
    /// Product-card boundary.
    pub card: &'static str,
    pub name: &'static str,
    pub detail: DetailShape,
    /// When configured and present in a card, variants are the
    /// `variant_item`s inside it; when configured but absent the card-level
    /// single weight/price pair applies; when not configured, `variant_item`s
    /// are enumerated directly under the card.
    pub variant_container: Option<&'static str>,
    pub variant_item: &'static str,
    pub variant_weight: &'static str,
    pub variant_price: &'static str,
    /// "Next page" control; `None` means the catalog is a single page once
    /// lazily-loaded content has been revealed.
    pub next_control: Option<&'static str>,
}

static DUTCHIE: LayoutDescriptor = LayoutDescriptor {
    frame: Some("iframe.dutchie--iframe"),
    age_gate: Some(Locator::ButtonText("Yes")),
    card: r#"div[data-testid="product-list-item"]"#,
    name: "span.mobile-product-list-item__ProductName-zxgt1n-6",
    detail: DetailShape::Composite {
        brand: "span.mobile-product-list-item__Brand-zxgt1n-3",
        detail: "div.mobile-product-list-item__DetailsContainer-zxgt1n-1",
    },
    variant_container: Some("div.mobile-product-list-item__MultipleOptionsContainer-zxgt1n-2"),
    variant_item: "button",
    variant_weight: "span.weight-tile__Label-otzu8j-5",
    variant_price: "span.weight-tile__PriceText-otzu8j-6",
    next_control: Some(r#"button[aria-label="go to next page"]"#),
};

static HIGH_PROFILE: LayoutDescriptor = LayoutDescriptor {
    frame: None,
    age_gate: Some(Locator::Css("#age-gate-yes")),
    card: "div.shopitem",
    name: "p.shopitem__title",
    detail: DetailShape::Discrete {
        brand: "p.shopitem__brand",
        strain: "p.shopitem__strain",
        potency: "p.shopitem__strain-thc",
    },
    variant_container: None,
    variant_item: "div.shopitem__listPrices-productVariants-item",
    variant_weight: "p.shopitem__listPrices-productVariants-name",
    variant_price: "p.shopitem__listPrices-productVariants-price",
    next_control: None,
};

/// The known markup shapes, selectable per site from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum MenuLayout {
    Dutchie,
    HighProfile,
}

impl MenuLayout {
    pub fn descriptor(&self) -> &'static LayoutDescriptor {
        match self {
            MenuLayout::Dutchie => &DUTCHIE,
            MenuLayout::HighProfile => &HIGH_PROFILE,
        }
    }
}
