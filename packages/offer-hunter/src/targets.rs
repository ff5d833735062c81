//! Bank promotion pages visited by every run, in visiting order.

/// Target URLs, visited in this order.
pub const DEFAULT_TARGETS: [&str; 25] = [
    "https://www.bracbank.com/en/retail/card/extra/dining",
    "https://www.bracbank.com/en/retail/card",
    "https://av.sc.com/bd/edm/b1g1-offers/",
    "https://www.sc.com/bd/promotions/",
    "https://www.sc.com/bd/credit-cards/",
    "https://www.sc.com/bd/credit-cards/visa-smart-platinum/",
    "https://www.sc.com/bd/credit-cards/visa-signature/",
    "https://www.sc.com/bd/credit-cards/super-value-titanium/",
    "https://www.sc.com/bd/credit-cards/silver-visa-mastercard/",
    "https://www.sc.com/bd/credit-cards/assurance-credit-card/",
    "https://www.sc.com/in/credit-cards/offers/",
    "https://www.bracbank.com/en/retail/card/extra/freeoffer",
    "https://www.bracbank.com/en/retail/card/extra/lifestyle",
    "https://www.bracbank.com/en/retail/card/extra/hotel",
    "https://www.ebl.com.bd/retail/EBL-Cards",
    "https://www.ebl.com.bd/retail/eblcard/EBL-Visa-Classic-Credit-Card",
    "https://www.ebl.com.bd/retail/eblcard/EBL-VISA-Gold-Credit-Card",
    "https://www.ebl.com.bd/retail/eblcard/EBL-VISA-Platinum-Credit-Card",
    "https://www.citybankplc.com/card/amex-cards",
    "https://www.citybankplc.com/platinum-reserve-credit-card/",
    "https://www.citybankplc.com/card/amex-platinum",
    "https://www.ucb.com.bd/cards/card-privileges",
    "https://www.americanexpress.com/en-bd/network/credit-cards/city-bank/gold-credit-card.html/",
    "https://www.americanexpress.com/en-bd/network/credit-cards/city-bank/platinum-credit-card.html/",
    "https://www.americanexpress.com/en-bd/network/credit-cards/city-bank/platinum-reserve-credit-card/",
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_targets_are_unique_https_urls() {
        let unique: HashSet<_> = DEFAULT_TARGETS.iter().collect();
        assert_eq!(unique.len(), DEFAULT_TARGETS.len());

        for target in DEFAULT_TARGETS {
            let url = url::Url::parse(target).unwrap();
            assert_eq!(url.scheme(), "https", "{target}");
        }
    }

    #[test]
    fn test_first_target_is_brac_dining() {
        assert_eq!(
            DEFAULT_TARGETS[0],
            "https://www.bracbank.com/en/retail/card/extra/dining"
        );
    }
}
