//! Closed token sets backing the enumerated registry columns.

use super::types::EnumDomain;

pub static PRODUCT_TYPE: EnumDomain = EnumDomain::new(
    "product_type",
    &[
        "LPPO",
    ],
);

pub static PLAN_CATEGORY: EnumDomain = EnumDomain::new(
    "plan_category",
    &[
        "Medicare Advantage",
    ],
);

pub static RUCC: EnumDomain = EnumDomain::new(
    "rucc",
    &[
        "1-Metro", "2-Metro", "3-Metro", "4-Nonmetro", "5-Nonmetro", "6-Nonmetro",
        "7-Nonmetro", "8-Nonmetro", "9-Nonmetro",
    ],
);

pub static LANG_SPOKEN: EnumDomain = EnumDomain::new(
    "lang_spoken",
    &[
        "ENG", "OTH", "SPA", "CPF", "CHI", "KOR", "FRE", "VIE", "YUE", "FAS", "PER", "JPN",
        "POL", "RUS", "POR", "TGL", "ARA", "ITA", "GER", "CRE", "CMN", "LAO", "DUT", "THA",
        "NAV", "ZZZ", "TAG", "HMG", "BEN", "PHI", "MAN", "HIN", "GUJ", "SRP", "IRA", "URD",
    ],
);

pub static CHANNEL: EnumDomain = EnumDomain::new(
    "channel",
    &[
        "Field", "Consumer Direct", "DMS Telesales", "Partner Call Center", "Brokerage",
    ],
);

pub static TENURE_BAND: EnumDomain = EnumDomain::new(
    "tenure_band",
    &[
        "0 - 0.5 YEARS", "0.5 - 1 YEARS", "1 - 1.5 YEARS", "1.5 - 2 YEARS", "2 - 3 YEARS",
        "3 - 4 YEARS", "4 - 5 YEARS", "5 - 6 YEARS", "6 - 7 YEARS", "7+ YEARS",
    ],
);

pub static MEASURE_NAME: EnumDomain = EnumDomain::new(
    "measure_name",
    &[
        "ADH (DIAB)", "ADH (ACE)", "ABA", "ADH (STATIN)", "PCR", "TRC (MRP)", "CBP", "COL",
        "CDC (EYE)", "CDC (NPH)", "CDC (HbA1c)", "BCS", "SUPD", "SPC STATIN", "ART", "OMW",
        "COA (MDR)", "COA (PNS)", "COA (FSA)", "COL (45-50)", "EED", "FMC", "HBD", "KED",
        "MRP", "TRC (PED)", "ESA", "SWT", "EGR", "RXC", "ETA", "MDR", "ASV", "TFP", "SFT",
        "TBC", "SBT", "TEX",
    ],
);

pub static MEASURE_TYPE: EnumDomain = EnumDomain::new(
    "measure_type",
    &[
        "Patient Safety", "HEDIS", "Patient Experience",
    ],
);

pub static SEX: EnumDomain = EnumDomain::new(
    "sex",
    &[
        "F", "M", "U",
    ],
);

pub static MCO_CONTRACT_NBR: EnumDomain = EnumDomain::new(
    "mco_contract_nbr",
    &[
        "H5216", "H8087", "H5970", "H5525", "H9070", "H7284", "H0473", "H7617", "H2029",
        "H6622", "H1036",
    ],
);

pub static STATE: EnumDomain = EnumDomain::new(
    "state",
    &[
        "FL", "MS", "TX", "AL", "TN", "NC", "KY", "VA", "MI", "NY", "GA", "NJ", "WA", "WI",
        "WV", "KS", "MN", "IL", "HI", "SC", "NM", "AR", "OH", "OK", "MA", "OR", "MT", "PA",
        "UT", "IA", "CO", "ME", "LA", "AZ", "IN", "NV", "ID", "SD", "ND", "MO", "MD", "NH",
        "AK", "NE", "CA", "PR", "CT", "WY", "VT", "RI", "DE", "DC", "VI", "GU", "MP", "AS",
    ],
);

pub static RACE: EnumDomain = EnumDomain::new(
    "race",
    &[
        "BLACK", "N AMERICAN NATIVE", "WHITE", "ASIAN", "HISPANIC", "UNKNOWN", "OTHER",
    ],
);

pub static CHRONICITY: EnumDomain = EnumDomain::new(
    "chronicity",
    &[
        "Chronic",
    ],
);

pub static HCC_MODEL_TYPE: EnumDomain = EnumDomain::new(
    "hcc_model_type",
    &[
        "MEDICAL", "ESRD",
    ],
);

pub static CMS_MODEL_VERS: EnumDomain = EnumDomain::new(
    "cms_model_vers",
    &[
        "V28", "V24",
    ],
);
