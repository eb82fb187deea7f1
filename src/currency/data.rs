//! Currency reference data.
//!
//! A static table of the currencies the rate API can convert, with lookup
//! by ISO code and fuzzy search for the picker.

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

/// A currency the converter can select.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Currency {
    /// ISO 4217 code, upper case.
    pub code: &'static str,
    pub name: &'static str,
    pub symbol: &'static str,
    pub flag: &'static str,
}

impl Currency {
    const fn new(
        code: &'static str,
        name: &'static str,
        symbol: &'static str,
        flag: &'static str,
    ) -> Self {
        Self {
            code,
            name,
            symbol,
            flag,
        }
    }

    /// Text the picker matches against.
    pub fn search_text(&self) -> String {
        format!("{} {}", self.code, self.name)
    }

    /// One-line label, e.g. `🇺🇸 USD - United States Dollar`.
    pub fn label(&self) -> String {
        format!("{} {} - {}", self.flag, self.code, self.name)
    }
}

/// All supported currencies, sorted by code.
pub static CURRENCIES: &[Currency] = &[
    Currency::new("AED", "UAE Dirham", "د.إ", "🇦🇪"),
    Currency::new("AFN", "Afghan Afghani", "؋", "🇦🇫"),
    Currency::new("ALL", "Albanian Lek", "L", "🇦🇱"),
    Currency::new("AMD", "Armenian Dram", "֏", "🇦🇲"),
    Currency::new("ANG", "Netherlands Antillian Guilder", "ƒ", "🇨🇼"),
    Currency::new("AOA", "Angolan Kwanza", "Kz", "🇦🇴"),
    Currency::new("ARS", "Argentine Peso", "$", "🇦🇷"),
    Currency::new("AUD", "Australian Dollar", "A$", "🇦🇺"),
    Currency::new("AWG", "Aruban Florin", "ƒ", "🇦🇼"),
    Currency::new("AZN", "Azerbaijani Manat", "₼", "🇦🇿"),
    Currency::new("BAM", "Bosnia and Herzegovina Mark", "KM", "🇧🇦"),
    Currency::new("BBD", "Barbados Dollar", "$", "🇧🇧"),
    Currency::new("BDT", "Bangladeshi Taka", "৳", "🇧🇩"),
    Currency::new("BGN", "Bulgarian Lev", "лв", "🇧🇬"),
    Currency::new("BHD", "Bahraini Dinar", "ب.د", "🇧🇭"),
    Currency::new("BIF", "Burundian Franc", "FBu", "🇧🇮"),
    Currency::new("BMD", "Bermudian Dollar", "$", "🇧🇲"),
    Currency::new("BND", "Brunei Dollar", "$", "🇧🇳"),
    Currency::new("BOB", "Bolivian Boliviano", "Bs.", "🇧🇴"),
    Currency::new("BRL", "Brazilian Real", "R$", "🇧🇷"),
    Currency::new("BSD", "Bahamian Dollar", "$", "🇧🇸"),
    Currency::new("BTN", "Bhutanese Ngultrum", "Nu.", "🇧🇹"),
    Currency::new("BWP", "Botswana Pula", "P", "🇧🇼"),
    Currency::new("BYN", "Belarusian Ruble", "Br", "🇧🇾"),
    Currency::new("BZD", "Belize Dollar", "$", "🇧🇿"),
    Currency::new("CAD", "Canadian Dollar", "C$", "🇨🇦"),
    Currency::new("CDF", "Congolese Franc", "FC", "🇨🇩"),
    Currency::new("CHF", "Swiss Franc", "CHF", "🇨🇭"),
    Currency::new("CLF", "Chilean Unidad de Fomento", "UF", "🇨🇱"),
    Currency::new("CLP", "Chilean Peso", "$", "🇨🇱"),
    Currency::new("CNH", "Offshore Chinese Renminbi", "¥", "🇨🇳"),
    Currency::new("CNY", "Chinese Renminbi", "¥", "🇨🇳"),
    Currency::new("COP", "Colombian Peso", "$", "🇨🇴"),
    Currency::new("CRC", "Costa Rican Colon", "₡", "🇨🇷"),
    Currency::new("CUP", "Cuban Peso", "$", "🇨🇺"),
    Currency::new("CVE", "Cape Verdean Escudo", "Esc", "🇨🇻"),
    Currency::new("CZK", "Czech Koruna", "Kč", "🇨🇿"),
    Currency::new("DJF", "Djiboutian Franc", "Fdj", "🇩🇯"),
    Currency::new("DKK", "Danish Krone", "kr", "🇩🇰"),
    Currency::new("DOP", "Dominican Peso", "RD$", "🇩🇴"),
    Currency::new("DZD", "Algerian Dinar", "دج", "🇩🇿"),
    Currency::new("EGP", "Egyptian Pound", "ج.م", "🇪🇬"),
    Currency::new("ERN", "Eritrean Nakfa", "Nfk", "🇪🇷"),
    Currency::new("ETB", "Ethiopian Birr", "Br", "🇪🇹"),
    Currency::new("EUR", "Euro", "€", "🇪🇺"),
    Currency::new("FJD", "Fiji Dollar", "$", "🇫🇯"),
    Currency::new("FKP", "Falkland Islands Pound", "£", "🇫🇰"),
    Currency::new("FOK", "Faroese Króna", "kr", "🇫🇴"),
    Currency::new("GBP", "Pound Sterling", "£", "🇬🇧"),
    Currency::new("GEL", "Georgian Lari", "₾", "🇬🇪"),
    Currency::new("GGP", "Guernsey Pound", "£", "🇬🇬"),
    Currency::new("GHS", "Ghanaian Cedi", "₵", "🇬🇭"),
    Currency::new("GIP", "Gibraltar Pound", "£", "🇬🇮"),
    Currency::new("GMD", "Gambian Dalasi", "D", "🇬🇲"),
    Currency::new("GNF", "Guinean Franc", "FG", "🇬🇳"),
    Currency::new("GTQ", "Guatemalan Quetzal", "Q", "🇬🇹"),
    Currency::new("GYD", "Guyanese Dollar", "$", "🇬🇾"),
    Currency::new("HKD", "Hong Kong Dollar", "HK$", "🇭🇰"),
    Currency::new("HNL", "Honduran Lempira", "L", "🇭🇳"),
    Currency::new("HRK", "Croatian Kuna", "kn", "🇭🇷"),
    Currency::new("HTG", "Haitian Gourde", "G", "🇭🇹"),
    Currency::new("HUF", "Hungarian Forint", "Ft", "🇭🇺"),
    Currency::new("IDR", "Indonesian Rupiah", "Rp", "🇮🇩"),
    Currency::new("ILS", "Israeli New Shekel", "₪", "🇮🇱"),
    Currency::new("IMP", "Manx Pound", "£", "🇮🇲"),
    Currency::new("INR", "Indian Rupee", "₹", "🇮🇳"),
    Currency::new("IQD", "Iraqi Dinar", "ع.د", "🇮🇶"),
    Currency::new("IRR", "Iranian Rial", "﷼", "🇮🇷"),
    Currency::new("ISK", "Icelandic Króna", "kr", "🇮🇸"),
    Currency::new("JEP", "Jersey Pound", "£", "🇯🇪"),
    Currency::new("JMD", "Jamaican Dollar", "$", "🇯🇲"),
    Currency::new("JOD", "Jordanian Dinar", "د.ا", "🇯🇴"),
    Currency::new("JPY", "Japanese Yen", "¥", "🇯🇵"),
    Currency::new("KES", "Kenyan Shilling", "Sh", "🇰🇪"),
    Currency::new("KGS", "Kyrgyzstani Som", "сом", "🇰🇬"),
    Currency::new("KHR", "Cambodian Riel", "៛", "🇰🇭"),
    Currency::new("KID", "Kiribati Dollar", "$", "🇰🇮"),
    Currency::new("KMF", "Comorian Franc", "CF", "🇰🇲"),
    Currency::new("KRW", "South Korean Won", "₩", "🇰🇷"),
    Currency::new("KWD", "Kuwaiti Dinar", "د.ك", "🇰🇼"),
    Currency::new("KYD", "Cayman Islands Dollar", "$", "🇰🇾"),
    Currency::new("KZT", "Kazakhstani Tenge", "₸", "🇰🇿"),
    Currency::new("LAK", "Lao Kip", "₭", "🇱🇦"),
    Currency::new("LBP", "Lebanese Pound", "ل.ل", "🇱🇧"),
    Currency::new("LKR", "Sri Lanka Rupee", "Rs", "🇱🇰"),
    Currency::new("LRD", "Liberian Dollar", "$", "🇱🇷"),
    Currency::new("LSL", "Lesotho Loti", "L", "🇱🇸"),
    Currency::new("LYD", "Libyan Dinar", "ل.د", "🇱🇾"),
    Currency::new("MAD", "Moroccan Dirham", "د.م", "🇲🇦"),
    Currency::new("MDL", "Moldovan Leu", "L", "🇲🇩"),
    Currency::new("MGA", "Malagasy Ariary", "Ar", "🇲🇬"),
    Currency::new("MKD", "Macedonian Denar", "ден", "🇲🇰"),
    Currency::new("MMK", "Burmese Kyat", "Ks", "🇲🇲"),
    Currency::new("MNT", "Mongolian Tögrög", "₮", "🇲🇳"),
    Currency::new("MOP", "Macanese Pataca", "P", "🇲🇴"),
    Currency::new("MRU", "Mauritanian Ouguiya", "UM", "🇲🇷"),
    Currency::new("MUR", "Mauritian Rupee", "₨", "🇲🇺"),
    Currency::new("MVR", "Maldivian Rufiyaa", "ރ.", "🇲🇻"),
    Currency::new("MWK", "Malawian Kwacha", "MK", "🇲🇼"),
    Currency::new("MXN", "Mexican Peso", "$", "🇲🇽"),
    Currency::new("MYR", "Malaysian Ringgit", "RM", "🇲🇾"),
    Currency::new("MZN", "Mozambican Metical", "MT", "🇲🇿"),
    Currency::new("NAD", "Namibian Dollar", "$", "🇳🇦"),
    Currency::new("NGN", "Nigerian Naira", "₦", "🇳🇬"),
    Currency::new("NIO", "Nicaraguan Córdoba", "C$", "🇳🇮"),
    Currency::new("NOK", "Norwegian Krone", "kr", "🇳🇴"),
    Currency::new("NPR", "Nepalese Rupee", "₨", "🇳🇵"),
    Currency::new("NZD", "New Zealand Dollar", "NZ$", "🇳🇿"),
    Currency::new("OMR", "Omani Rial", "ر.ع.", "🇴🇲"),
    Currency::new("PAB", "Panamanian Balboa", "B/.", "🇵🇦"),
    Currency::new("PEN", "Peruvian Sol", "S/.", "🇵🇪"),
    Currency::new("PGK", "Papua New Guinean Kina", "K", "🇵🇬"),
    Currency::new("PHP", "Philippine Peso", "₱", "🇵🇭"),
    Currency::new("PKR", "Pakistani Rupee", "₨", "🇵🇰"),
    Currency::new("PLN", "Polish Złoty", "zł", "🇵🇱"),
    Currency::new("PYG", "Paraguayan Guaraní", "₲", "🇵🇾"),
    Currency::new("QAR", "Qatari Riyal", "ر.ق", "🇶🇦"),
    Currency::new("RON", "Romanian Leu", "lei", "🇷🇴"),
    Currency::new("RSD", "Serbian Dinar", "дин", "🇷🇸"),
    Currency::new("RUB", "Russian Ruble", "₽", "🇷🇺"),
    Currency::new("RWF", "Rwandan Franc", "RF", "🇷🇼"),
    Currency::new("SAR", "Saudi Riyal", "ر.س", "🇸🇦"),
    Currency::new("SBD", "Solomon Islands Dollar", "$", "🇸🇧"),
    Currency::new("SCR", "Seychellois Rupee", "₨", "🇸🇨"),
    Currency::new("SDG", "Sudanese Pound", "ج.س", "🇸🇩"),
    Currency::new("SEK", "Swedish Krona", "kr", "🇸🇪"),
    Currency::new("SGD", "Singapore Dollar", "S$", "🇸🇬"),
    Currency::new("SHP", "Saint Helena Pound", "£", "🇸🇭"),
    Currency::new("SLE", "Sierra Leonean Leone", "Le", "🇸🇱"),
    Currency::new("SOS", "Somali Shilling", "Sh", "🇸🇴"),
    Currency::new("SRD", "Surinamese Dollar", "$", "🇸🇷"),
    Currency::new("SSP", "South Sudanese Pound", "£", "🇸🇸"),
    Currency::new("STN", "São Tomé and Príncipe Dobra", "Db", "🇸🇹"),
    Currency::new("SYP", "Syrian Pound", "ل.س", "🇸🇾"),
    Currency::new("SZL", "Eswatini Lilangeni", "E", "🇸🇿"),
    Currency::new("THB", "Thai Baht", "฿", "🇹🇭"),
    Currency::new("TJS", "Tajikistani Somoni", "ЅМ", "🇹🇯"),
    Currency::new("TMT", "Turkmenistan Manat", "m", "🇹🇲"),
    Currency::new("TND", "Tunisian Dinar", "د.ت", "🇹🇳"),
    Currency::new("TOP", "Tongan Paʻanga", "T$", "🇹🇴"),
    Currency::new("TRY", "Turkish Lira", "₺", "🇹🇷"),
    Currency::new("TTD", "Trinidad and Tobago Dollar", "TT$", "🇹🇹"),
    Currency::new("TVD", "Tuvaluan Dollar", "$", "🇹🇻"),
    Currency::new("TWD", "New Taiwan Dollar", "NT$", "🇹🇼"),
    Currency::new("TZS", "Tanzanian Shilling", "Sh", "🇹🇿"),
    Currency::new("UAH", "Ukrainian Hryvnia", "₴", "🇺🇦"),
    Currency::new("UGX", "Ugandan Shilling", "Sh", "🇺🇬"),
    Currency::new("USD", "United States Dollar", "$", "🇺🇸"),
    Currency::new("UYU", "Uruguayan Peso", "$U", "🇺🇾"),
    Currency::new("UZS", "Uzbekistani So'm", "so'm", "🇺🇿"),
    Currency::new("VES", "Venezuelan Bolívar Soberano", "Bs.", "🇻🇪"),
    Currency::new("VND", "Vietnamese Đồng", "₫", "🇻🇳"),
    Currency::new("VUV", "Vanuatu Vatu", "Vt", "🇻🇺"),
    Currency::new("WST", "Samoan Tālā", "T", "🇼🇸"),
    Currency::new("XAF", "Central African CFA Franc", "FCFA", "🇨🇲"),
    Currency::new("XCD", "East Caribbean Dollar", "$", "🇦🇬"),
    Currency::new("XDR", "Special Drawing Rights", "SDR", "🌐"),
    Currency::new("XOF", "West African CFA franc", "CFA", "🇨🇮"),
    Currency::new("XPF", "CFP Franc", "₣", "🇵🇫"),
    Currency::new("YER", "Yemeni Rial", "﷼", "🇾🇪"),
    Currency::new("ZAR", "South African Rand", "R", "🇿🇦"),
    Currency::new("ZMW", "Zambian Kwacha", "ZK", "🇿🇲"),
    Currency::new("ZWL", "Zimbabwean Dollar", "Z$", "🇿🇼"),
];

/// Find a currency by code, ignoring case.
pub fn find(code: &str) -> Option<&'static Currency> {
    let code = code.trim();
    CURRENCIES.iter().find(|c| c.code.eq_ignore_ascii_case(code))
}

/// Fuzzy search over code and name, best match first.
///
/// An empty query returns the whole table in code order.
pub fn search(query: &str) -> Vec<&'static Currency> {
    let query = query.trim();
    if query.is_empty() {
        return CURRENCIES.iter().collect();
    }

    let matcher = SkimMatcherV2::default().ignore_case();
    let mut scored: Vec<(&'static Currency, i64)> = CURRENCIES
        .iter()
        .filter_map(|currency| {
            matcher
                .fuzzy_match(&currency.search_text(), query)
                .map(|score| (currency, score))
        })
        .collect();

    // Stable sort keeps code order among equal scores
    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored.into_iter().map(|(currency, _)| currency).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_sorted_and_unique() {
        for pair in CURRENCIES.windows(2) {
            assert!(pair[0].code < pair[1].code, "{} >= {}", pair[0].code, pair[1].code);
        }
    }

    #[test]
    fn test_find_by_code() {
        let usd = find("USD").unwrap();
        assert_eq!(usd.name, "United States Dollar");
        assert_eq!(usd.symbol, "$");
        assert_eq!(find("hnl").unwrap().name, "Honduran Lempira");
        assert!(find("XYZ").is_none());
    }

    #[test]
    fn test_search_empty_returns_all() {
        assert_eq!(search("").len(), CURRENCIES.len());
    }

    #[test]
    fn test_search_by_code_and_name() {
        assert_eq!(search("EUR")[0].code, "EUR");
        assert!(search("lempira").iter().any(|c| c.code == "HNL"));
        assert!(search("zzzzqqq").is_empty());
    }

    #[test]
    fn test_label() {
        assert_eq!(find("EUR").unwrap().label(), "🇪🇺 EUR - Euro");
    }
}
