use anyhow::Result;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

use crate::models::{DetailShape, LayoutDescriptor, ProductRecord, NO_BRAND, NO_NAME, UNKNOWN};
use crate::parsers::{
    clean_text, parse_composite_detail, parse_potency_label, parse_price, parse_weight,
};

fn parse_selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|_| anyhow::anyhow!("Failed to parse selector `{}`", css))
}

fn select_text(scope: ElementRef<'_>, selector: &Selector) -> Option<String> {
    scope
        .select(selector)
        .next()
        .map(|elem| clean_text(&elem.text().collect::<String>()))
}

enum ParsedDetail {
    Composite {
        brand: Selector,
        detail: Selector,
    },
    Discrete {
        brand: Selector,
        strain: Selector,
        potency: Selector,
    },
}

impl ParsedDetail {
    fn new(shape: &DetailShape) -> Result<Self> {
        Ok(match shape {
            DetailShape::Composite { brand, detail } => ParsedDetail::Composite {
                brand: parse_selector(brand)?,
                detail: parse_selector(detail)?,
            },
            DetailShape::Discrete {
                brand,
                strain,
                potency,
            } => ParsedDetail::Discrete {
                brand: parse_selector(brand)?,
                strain: parse_selector(strain)?,
                potency: parse_selector(potency)?,
            },
        })
    }

    /// Brand, strain type and potency for one card, with sentinel defaults.
    fn read(&self, card: ElementRef<'_>) -> (String, String, Option<f64>) {
        match self {
            ParsedDetail::Composite { brand, detail } => {
                let brand =
                    select_text(card, brand).unwrap_or_else(|| NO_BRAND.to_string());
                let (strain_type, potency) = match select_text(card, detail) {
                    Some(detail_text) => parse_composite_detail(&detail_text),
                    None => (UNKNOWN.to_string(), None),
                };
                (brand, strain_type, potency)
            }
            ParsedDetail::Discrete {
                brand,
                strain,
                potency,
            } => {
                let brand = select_text(card, brand).unwrap_or_else(|| UNKNOWN.to_string());
                let strain_type =
                    select_text(card, strain).unwrap_or_else(|| UNKNOWN.to_string());
                let potency =
                    select_text(card, potency).and_then(|text| parse_potency_label(&text));
                (brand, strain_type, potency)
            }
        }
    }
}

/// Extract every product record visible in one rendered page.
///
/// Cards missing name, brand or detail text still produce records with the
/// sentinel defaults; a variant is emitted only when both its weight and its
/// price normalize, and a card with no valid variant contributes nothing.
pub fn extract_products(
    html: &str,
    layout: &LayoutDescriptor,
    location: &str,
) -> Result<Vec<ProductRecord>> {
    let document = Html::parse_document(html);

    let card_selector = parse_selector(layout.card)?;
    let name_selector = parse_selector(layout.name)?;
    let item_selector = parse_selector(layout.variant_item)?;
    let weight_selector = parse_selector(layout.variant_weight)?;
    let price_selector = parse_selector(layout.variant_price)?;
    let container_selector = layout
        .variant_container
        .map(parse_selector)
        .transpose()?;
    let detail = ParsedDetail::new(&layout.detail)?;

    let mut records = Vec::new();

    for card in document.select(&card_selector) {
        let name = select_text(card, &name_selector).unwrap_or_else(|| NO_NAME.to_string());
        let (brand, strain_type, potency) = detail.read(card);

        let mut push_variant = |scope: ElementRef<'_>| {
            let weight = select_text(scope, &weight_selector).and_then(|t| parse_weight(&t));
            let price = select_text(scope, &price_selector).and_then(|t| parse_price(&t));
            // both-required: a price without a resolvable weight is not
            // actionable data, and vice versa
            if let (Some(weight), Some(price)) = (weight, price) {
                records.push(ProductRecord {
                    name: name.clone(),
                    brand: brand.clone(),
                    strain_type: strain_type.clone(),
                    potency,
                    weight: Some(weight),
                    price: Some(price),
                    location: location.to_string(),
                });
            } else {
                debug!("Skipping variant of {} without both weight and price", name);
            }
        };

        match &container_selector {
            Some(container_selector) => match card.select(container_selector).next() {
                Some(container) => {
                    for item in container.select(&item_selector) {
                        push_variant(item);
                    }
                }
                // no options container: single weight/price pair on the card
                None => push_variant(card),
            },
            // variant items sit directly in the card
            None => {
                for item in card.select(&item_selector) {
                    push_variant(item);
                }
            }
        }
    }

    Ok(records)
}

/// Count product-card boundaries in rendered markup. Used by the incremental
/// loader to detect when lazy loading has stopped producing new cards.
pub fn count_cards(html: &str, layout: &LayoutDescriptor) -> usize {
    let document = Html::parse_document(html);
    match Selector::parse(layout.card) {
        Ok(selector) => document.select(&selector).count(),
        Err(_) => {
            warn!("Card selector `{}` did not parse; counting no cards", layout.card);
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MenuLayout;
    use pretty_assertions::assert_eq;

    fn dutchie_card(name: &str, detail: &str, variants: &str) -> String {
        format!(
            r#"<div data-testid="product-list-item">
                 <span class="mobile-product-list-item__ProductName-zxgt1n-6">{name}</span>
                 <span class="mobile-product-list-item__Brand-zxgt1n-3">Acme</span>
                 <div class="mobile-product-list-item__DetailsContainer-zxgt1n-1">{detail}</div>
                 {variants}
               </div>"#
        )
    }

    fn variant_button(weight: &str, price: &str) -> String {
        format!(
            r#"<button>
                 <span class="weight-tile__Label-otzu8j-5">{weight}</span>
                 <span class="weight-tile__PriceText-otzu8j-6">{price}</span>
               </button>"#
        )
    }

    #[test]
    fn multi_variant_card_expands_to_one_record_per_variant() {
        let buttons = format!(
            "{}{}",
            variant_button("1/8 oz -", "$25"),
            variant_button("1/4 oz -", "$45")
        );
        let html = dutchie_card(
            "Blue Dream",
            "Hybrid • THC: 22.0%",
            &format!(
                r#"<div class="mobile-product-list-item__MultipleOptionsContainer-zxgt1n-2">{buttons}</div>"#
            ),
        );
        let records =
            extract_products(&html, MenuLayout::Dutchie.descriptor(), "Greenlight").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].weight, Some(0.125));
        assert_eq!(records[0].price, Some(25.0));
        assert_eq!(records[1].weight, Some(0.25));
        assert_eq!(records[1].price, Some(45.0));
        for record in &records {
            assert_eq!(record.name, "Blue Dream");
            assert_eq!(record.brand, "Acme");
            assert_eq!(record.strain_type, "Hybrid");
            assert_eq!(record.potency, Some(22.0));
            assert_eq!(record.location, "Greenlight");
        }
    }

    #[test]
    fn partial_variants_are_skipped() {
        // three variants, one without a price, one with an unparsable weight
        let buttons = format!(
            "{}{}{}",
            variant_button("1/8 oz -", "$25"),
            r#"<button><span class="weight-tile__Label-otzu8j-5">1/4 oz -</span></button>"#,
            variant_button("each", "$60")
        );
        let html = dutchie_card(
            "Gelato",
            "Indica • THC: 25.5%",
            &format!(
                r#"<div class="mobile-product-list-item__MultipleOptionsContainer-zxgt1n-2">{buttons}</div>"#
            ),
        );
        let records =
            extract_products(&html, MenuLayout::Dutchie.descriptor(), "CODES").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].weight, Some(0.125));
    }

    #[test]
    fn two_valid_variants_of_three_share_their_base_fields() {
        // middle variant has no price span at all
        let buttons = format!(
            "{}{}{}",
            variant_button("1/8 oz -", "$25"),
            r#"<button><span class="weight-tile__Label-otzu8j-5">1/4 oz -</span></button>"#,
            variant_button("1/2 oz -", "$80")
        );
        let html = dutchie_card(
            "Gelato",
            "Indica • THC: 25.5%",
            &format!(
                r#"<div class="mobile-product-list-item__MultipleOptionsContainer-zxgt1n-2">{buttons}</div>"#
            ),
        );
        let records =
            extract_products(&html, MenuLayout::Dutchie.descriptor(), "CODES").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].weight, Some(0.125));
        assert_eq!(records[0].price, Some(25.0));
        assert_eq!(records[1].weight, Some(0.5));
        assert_eq!(records[1].price, Some(80.0));
        for record in &records {
            assert_eq!(record.name, "Gelato");
            assert_eq!(record.brand, "Acme");
            assert_eq!(record.strain_type, "Indica");
            assert_eq!(record.potency, Some(25.5));
            assert_eq!(record.location, "CODES");
        }
    }

    #[test]
    fn single_variant_card_without_container_uses_card_level_pair() {
        let html = dutchie_card(
            "Blue Dream",
            "Hybrid • THC: 22.0%",
            &variant_button("3.5g", "$40"),
        );
        let records =
            extract_products(&html, MenuLayout::Dutchie.descriptor(), "Good Day Farm").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].weight, Some(3.5));
        assert_eq!(records[0].price, Some(40.0));
    }

    #[test]
    fn missing_fields_fall_back_to_sentinels() {
        let html = format!(
            r#"<div data-testid="product-list-item">{}</div>"#,
            variant_button("1 oz", "$180")
        );
        let records =
            extract_products(&html, MenuLayout::Dutchie.descriptor(), "CODES").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "No name found");
        assert_eq!(records[0].brand, "No brand found");
        assert_eq!(records[0].strain_type, "Unknown");
        assert_eq!(records[0].potency, None);
    }

    #[test]
    fn card_with_no_valid_variant_emits_nothing() {
        let html = dutchie_card("Sold Out Special", "Sativa • THC: 19.0%", "");
        let records =
            extract_products(&html, MenuLayout::Dutchie.descriptor(), "CODES").unwrap();
        assert!(records.is_empty());
    }

    fn high_profile_page() -> &'static str {
        r#"<div class="shopitem">
             <p class="shopitem__title">Wedding Cake</p>
             <p class="shopitem__strain">Indica</p>
             <p class="shopitem__strain-thc">THC: 30.69%</p>
             <p class="shopitem__brand">Cookies</p>
             <div class="shopitem__listPrices-productVariants-item">
               <p class="shopitem__listPrices-productVariants-name">3.5g</p>
               <p class="shopitem__listPrices-productVariants-price">$35.00</p>
             </div>
             <div class="shopitem__listPrices-productVariants-item">
               <p class="shopitem__listPrices-productVariants-name">7g</p>
               <p class="shopitem__listPrices-productVariants-price">$65.00</p>
             </div>
           </div>
           <div class="shopitem">
             <p class="shopitem__title">Mystery Flower</p>
           </div>"#
    }

    #[test]
    fn discrete_shape_reads_separate_fields() {
        let records = extract_products(
            high_profile_page(),
            MenuLayout::HighProfile.descriptor(),
            "High Profile",
        )
        .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Wedding Cake");
        assert_eq!(records[0].brand, "Cookies");
        assert_eq!(records[0].strain_type, "Indica");
        assert_eq!(records[0].potency, Some(30.69));
        assert_eq!(records[0].weight, Some(3.5));
        assert_eq!(records[1].price, Some(65.0));
    }

    #[test]
    fn extraction_is_idempotent_over_identical_markup() {
        let layout = MenuLayout::HighProfile.descriptor();
        let first = extract_products(high_profile_page(), layout, "High Profile").unwrap();
        let second = extract_products(high_profile_page(), layout, "High Profile").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn every_emitted_record_has_weight_and_price() {
        let records = extract_products(
            high_profile_page(),
            MenuLayout::HighProfile.descriptor(),
            "High Profile",
        )
        .unwrap();
        assert!(records
            .iter()
            .all(|r| r.weight.is_some() && r.price.is_some()));
    }

    #[test]
    fn card_count_matches_boundaries() {
        assert_eq!(
            count_cards(high_profile_page(), MenuLayout::HighProfile.descriptor()),
            2
        );
        assert_eq!(
            count_cards("<p>empty</p>", MenuLayout::HighProfile.descriptor()),
            0
        );
    }

    #[test]
    fn unparsable_card_selector_counts_nothing() {
        let layout = crate::models::LayoutDescriptor {
            card: "div[[",
            ..*MenuLayout::HighProfile.descriptor()
        };
        assert_eq!(count_cards(high_profile_page(), &layout), 0);
    }
}
