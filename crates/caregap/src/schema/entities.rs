//! Entity declarations, in registry order.
//!
//! Column order here is the order used for storage, insertion and export.

use super::column::ColumnSpec;
use super::enums;
use super::table::EntitySpec;
use super::types::Cardinality;

static TARGET_MEMBERS_COLUMNS: [ColumnSpec; 4] = [
    ColumnSpec::integer("calendar_year"),
    ColumnSpec::enumerated("product_type", &enums::PRODUCT_TYPE),
    ColumnSpec::enumerated("plan_category", &enums::PLAN_CATEGORY),
    ColumnSpec::boolean("preventive_visit_gap_ind"),
];

static ADDITIONAL_FEATURES_COLUMNS: [ColumnSpec; 11] = [
    ColumnSpec::float("cci_score"),
    ColumnSpec::integer("dcsi_score"),
    ColumnSpec::integer("fci_score"),
    ColumnSpec::float("cms_tot_partd_payment_amt"),
    ColumnSpec::float("cms_tot_ma_payment_amt"),
    ColumnSpec::boolean("cms_frailty_ind"),
    ColumnSpec::float("atlas_grocpth14"),
    ColumnSpec::float("atlas_povertyallagespct"),
    ColumnSpec::float("atlas_recfacpth14"),
    ColumnSpec::float("atlas_ffrpth14"),
    ColumnSpec::float("atlas_fsrpth14"),
];

static MARKETING_CONTROL_POINT_COLUMNS: [ColumnSpec; 65] = [
    ColumnSpec::integer("cnt_cp_emails_0"),
    ColumnSpec::integer("cnt_cp_emails_1"),
    ColumnSpec::integer("cnt_cp_emails_10"),
    ColumnSpec::integer("cnt_cp_emails_11"),
    ColumnSpec::integer("cnt_cp_emails_2"),
    ColumnSpec::integer("cnt_cp_emails_3"),
    ColumnSpec::integer("cnt_cp_emails_4"),
    ColumnSpec::integer("cnt_cp_emails_5"),
    ColumnSpec::integer("cnt_cp_emails_6"),
    ColumnSpec::integer("cnt_cp_emails_7"),
    ColumnSpec::integer("cnt_cp_emails_8"),
    ColumnSpec::integer("cnt_cp_emails_9"),
    ColumnSpec::float("cnt_cp_emails_pmpm_ct"),
    ColumnSpec::integer("cnt_cp_livecall_0"),
    ColumnSpec::integer("cnt_cp_livecall_1"),
    ColumnSpec::integer("cnt_cp_livecall_10"),
    ColumnSpec::integer("cnt_cp_livecall_11"),
    ColumnSpec::integer("cnt_cp_livecall_2"),
    ColumnSpec::integer("cnt_cp_livecall_3"),
    ColumnSpec::integer("cnt_cp_livecall_4"),
    ColumnSpec::integer("cnt_cp_livecall_5"),
    ColumnSpec::integer("cnt_cp_livecall_6"),
    ColumnSpec::integer("cnt_cp_livecall_7"),
    ColumnSpec::integer("cnt_cp_livecall_8"),
    ColumnSpec::integer("cnt_cp_livecall_9"),
    ColumnSpec::float("cnt_cp_livecall_pmpm_ct"),
    ColumnSpec::integer("cnt_cp_print_0"),
    ColumnSpec::integer("cnt_cp_print_1"),
    ColumnSpec::integer("cnt_cp_print_10"),
    ColumnSpec::integer("cnt_cp_print_11"),
    ColumnSpec::integer("cnt_cp_print_2"),
    ColumnSpec::integer("cnt_cp_print_3"),
    ColumnSpec::integer("cnt_cp_print_4"),
    ColumnSpec::integer("cnt_cp_print_5"),
    ColumnSpec::integer("cnt_cp_print_6"),
    ColumnSpec::integer("cnt_cp_print_7"),
    ColumnSpec::integer("cnt_cp_print_8"),
    ColumnSpec::integer("cnt_cp_print_9"),
    ColumnSpec::float("cnt_cp_print_pmpm_ct"),
    ColumnSpec::integer("cnt_cp_vat_0"),
    ColumnSpec::integer("cnt_cp_vat_1"),
    ColumnSpec::integer("cnt_cp_vat_10"),
    ColumnSpec::integer("cnt_cp_vat_11"),
    ColumnSpec::integer("cnt_cp_vat_2"),
    ColumnSpec::integer("cnt_cp_vat_3"),
    ColumnSpec::integer("cnt_cp_vat_4"),
    ColumnSpec::integer("cnt_cp_vat_5"),
    ColumnSpec::integer("cnt_cp_vat_6"),
    ColumnSpec::integer("cnt_cp_vat_7"),
    ColumnSpec::integer("cnt_cp_vat_8"),
    ColumnSpec::integer("cnt_cp_vat_9"),
    ColumnSpec::float("cnt_cp_vat_pmpm_ct"),
    ColumnSpec::integer("cnt_cp_webstatement_0"),
    ColumnSpec::integer("cnt_cp_webstatement_1"),
    ColumnSpec::integer("cnt_cp_webstatement_10"),
    ColumnSpec::integer("cnt_cp_webstatement_11"),
    ColumnSpec::integer("cnt_cp_webstatement_2"),
    ColumnSpec::integer("cnt_cp_webstatement_3"),
    ColumnSpec::integer("cnt_cp_webstatement_4"),
    ColumnSpec::integer("cnt_cp_webstatement_5"),
    ColumnSpec::integer("cnt_cp_webstatement_6"),
    ColumnSpec::integer("cnt_cp_webstatement_7"),
    ColumnSpec::integer("cnt_cp_webstatement_8"),
    ColumnSpec::integer("cnt_cp_webstatement_9"),
    ColumnSpec::float("cnt_cp_webstatement_pmpm_ct"),
];

static COST_AND_UTILIZATION_COLUMNS: [ColumnSpec; 35] = [
    ColumnSpec::float("bh_psyc_visit_ct_pmpm"),
    ColumnSpec::float("bh_rtc_admit_ct_pmpm"),
    ColumnSpec::float("bh_rtc_admit_days_pmpm"),
    ColumnSpec::integer("days_since_last_clm"),
    ColumnSpec::float("nonpar_allowed_pmpm_cost"),
    ColumnSpec::float("nonpar_clm_ct_pmpm"),
    ColumnSpec::float("nonpar_cob_paid_pmpm_cost"),
    ColumnSpec::float("nonpar_coins_pmpm_cost"),
    ColumnSpec::float("nonpar_copay_pmpm_cost"),
    ColumnSpec::float("nonpar_deduct_pmpm_cost"),
    ColumnSpec::integer("nonpar_ds_clm"),
    ColumnSpec::float("nonpar_mbr_resp_pmpm_cost"),
    ColumnSpec::float("nonpar_net_paid_pmpm_cost"),
    ColumnSpec::float("oontwk_allowed_pmpm_cost"),
    ColumnSpec::float("oontwk_clm_ct_pmpm"),
    ColumnSpec::float("oontwk_cob_paid_pmpm_cost"),
    ColumnSpec::float("oontwk_coins_pmpm_cost"),
    ColumnSpec::float("oontwk_copay_pmpm_cost"),
    ColumnSpec::float("oontwk_deduct_pmpm_cost"),
    ColumnSpec::integer("oontwk_ds_clm"),
    ColumnSpec::float("oontwk_mbr_resp_pmpm_cost"),
    ColumnSpec::float("oontwk_net_paid_pmpm_cost"),
    ColumnSpec::float("total_allowed_pmpm_cost"),
    ColumnSpec::float("total_cob_paid_pmpm_cost"),
    ColumnSpec::float("total_coins_pmpm_cost"),
    ColumnSpec::float("total_copay_pmpm_cost"),
    ColumnSpec::float("total_deduct_pmpm_cost"),
    ColumnSpec::float("total_ip_acute_admit_days_pmpm"),
    ColumnSpec::float("total_ip_ltach_admit_days_pmpm"),
    ColumnSpec::float("total_ip_maternity_admit_days_pmpm"),
    ColumnSpec::float("total_ip_mhsa_admit_days_pmpm"),
    ColumnSpec::float("total_ip_rehab_admit_days_pmpm"),
    ColumnSpec::float("total_ip_snf_admit_days_pmpm"),
    ColumnSpec::float("total_mbr_resp_pmpm_cost"),
    ColumnSpec::float("total_net_paid_pmpm_cost"),
];

static DEMOGRAPHICS_COLUMNS: [ColumnSpec; 6] = [
    ColumnSpec::boolean("riskarr_downside"),
    ColumnSpec::boolean("riskarr_global"),
    ColumnSpec::boolean("riskarr_rewards"),
    ColumnSpec::boolean("riskarr_upside"),
    ColumnSpec::enumerated("rucc_category", &enums::RUCC),
    ColumnSpec::enumerated("lang_spoken_cd", &enums::LANG_SPOKEN),
];

static PHARMACY_UTILIZATION_COLUMNS: [ColumnSpec; 16] = [
    ColumnSpec::integer("rx_days_since_last_script"),
    ColumnSpec::float("rx_overall_coins_pmpm_cost"),
    ColumnSpec::float("rx_overall_copay_pmpm_cost"),
    ColumnSpec::float("rx_overall_deduct_pmpm_cost"),
    ColumnSpec::float("rx_overall_dist_gpi6_pmpm_ct"),
    ColumnSpec::float("rx_overall_gpi_pmpm_ct"),
    ColumnSpec::float("rx_overall_mbr_resp_pmpm_cost"),
    ColumnSpec::float("rx_overall_net_paid_pmpm_cost"),
    ColumnSpec::float("rx_overall_pmpm_cost"),
    ColumnSpec::float("rx_overall_pmpm_ct"),
    ColumnSpec::float("rx_perphy_pmpm_ct"),
    ColumnSpec::float("rx_pharmacies_pmpm_ct"),
    ColumnSpec::float("rx_tier_1_pmpm_ct"),
    ColumnSpec::float("rx_tier_2_pmpm_ct"),
    ColumnSpec::float("rx_tier_3_pmpm_ct"),
    ColumnSpec::float("rx_tier_4_pmpm_ct"),
];

static CHANNEL_COLUMNS: [ColumnSpec; 1] = [
    ColumnSpec::enumerated("channel", &enums::CHANNEL),
];

static SOCIAL_DETERMINANTS_OF_HEALTH_COLUMNS: [ColumnSpec; 77] = [
    ColumnSpec::float("rwjf_preventable_ip_rate"),
    ColumnSpec::float("rwjf_healthcare_cost"),
    ColumnSpec::float("rwjf_other_pcp"),
    ColumnSpec::float("rwjf_uninsured_adults_pct"),
    ColumnSpec::float("rwjf_uninsured_child_pct"),
    ColumnSpec::float("rwjf_diabetes_monitor_pct"),
    ColumnSpec::float("rwjf_flu_vax"),
    ColumnSpec::float("rwjf_mammography_pct"),
    ColumnSpec::float("rwjf_uninsured_pct"),
    ColumnSpec::float("rwjf_pcp_rate"),
    ColumnSpec::float("rwjf_dentists_ratio"),
    ColumnSpec::float("rwjf_men_hlth_prov_ratio"),
    ColumnSpec::float("rwjf_age_gt_65_pct"),
    ColumnSpec::float("rwjf_native_race_pct"),
    ColumnSpec::float("rwjf_asian_race_pct"),
    ColumnSpec::float("rwjf_age_lt_18_pct"),
    ColumnSpec::float("rwjf_female_pct"),
    ColumnSpec::float("rwjf_hispanic_pct"),
    ColumnSpec::float("rwjf_hawaiian_race_pct"),
    ColumnSpec::float("rwjf_african_race_pct"),
    ColumnSpec::float("rwjf_white_race_pct"),
    ColumnSpec::float("rwjf_non_english_pct"),
    ColumnSpec::float("rwjf_rural_pct"),
    ColumnSpec::float("rwjf_population"),
    ColumnSpec::float("rwjf_drug_overdose_deaths_rate"),
    ColumnSpec::float("rwjf_drug_deaths_modl_rate"),
    ColumnSpec::float("rwjf_food_insecurity_pct"),
    ColumnSpec::float("rwjf_food_env_inx"),
    ColumnSpec::float("rwjf_insufficient_sleep_pct"),
    ColumnSpec::float("rwjf_limit_hlthy_food_pct"),
    ColumnSpec::float("rwjf_mv_deaths_rate"),
    ColumnSpec::float("rwjf_teen_births_rate"),
    ColumnSpec::float("rwjf_std_infect_rate"),
    ColumnSpec::float("rwjf_inactivity_pct"),
    ColumnSpec::float("rwjf_alcoholic_pct"),
    ColumnSpec::float("rwjf_adult_obesity_pct"),
    ColumnSpec::float("rwjf_adult_smoking_pct"),
    ColumnSpec::float("rwjf_dui_deaths_pct"),
    ColumnSpec::float("rwjf_exercise_access_pct"),
    ColumnSpec::float("rwjf_mental_distress_pct"),
    ColumnSpec::float("rwjf_physical_distress_pct"),
    ColumnSpec::float("rwjf_premature_death_rate"),
    ColumnSpec::float("rwjf_poor_men_hlth_days"),
    ColumnSpec::float("rwjf_poor_phy_hlth_days"),
    ColumnSpec::float("rwjf_life_expectancy"),
    ColumnSpec::float("rwjf_child_mortality"),
    ColumnSpec::float("rwjf_diabetes_pct"),
    ColumnSpec::float("rwjf_hiv_rate"),
    ColumnSpec::float("rwjf_infant_mortality"),
    ColumnSpec::float("rwjf_poor_health_pct"),
    ColumnSpec::float("rwjf_low_birthweight_pct"),
    ColumnSpec::float("rwjf_premature_mortality"),
    ColumnSpec::float("rwjf_long_commute_alone_pct"),
    ColumnSpec::float("rwjf_air_pollute_density"),
    ColumnSpec::boolean("rwjf_drinkwater_violate_ind"),
    ColumnSpec::float("rwjf_housing_cost_burden_pct"),
    ColumnSpec::float("rwjf_severe_housing_pct"),
    ColumnSpec::float("rwjf_broadband_access"),
    ColumnSpec::float("rwjf_home_ownership_pct"),
    ColumnSpec::float("rwjf_drive_alone_pct"),
    ColumnSpec::float("rwjf_disconnect_youth_pct"),
    ColumnSpec::float("rwjf_child_free_lunch_pct"),
    ColumnSpec::float("rwjf_firearm_fatalities_rate"),
    ColumnSpec::float("rwjf_homicides_rate"),
    ColumnSpec::float("rwjf_median_house_income"),
    ColumnSpec::float("rwjf_injury_deaths_rate"),
    ColumnSpec::float("rwjf_social_associate_rate"),
    ColumnSpec::float("rwjf_violent_crime_rate"),
    ColumnSpec::float("rwjf_some_college_pct"),
    ColumnSpec::float("rwjf_single_parent_pct"),
    ColumnSpec::float("rwjf_child_poverty_pct"),
    ColumnSpec::float("rwjf_high_school_pct"),
    ColumnSpec::float("rwjf_unemploy_pct"),
    ColumnSpec::float("rwjf_income_inequ_ratio"),
    ColumnSpec::float("rwjf_resident_seg_black_inx"),
    ColumnSpec::float("rwjf_resident_seg_nonwhite_inx"),
    ColumnSpec::float("rwjf_suicides_rate"),
];

static WEB_ACTIVITY_COLUMNS: [ColumnSpec; 14] = [
    ColumnSpec::integer("login_count_0"),
    ColumnSpec::integer("login_count_1"),
    ColumnSpec::integer("login_count_10"),
    ColumnSpec::integer("login_count_11"),
    ColumnSpec::integer("login_count_2"),
    ColumnSpec::integer("login_count_3"),
    ColumnSpec::integer("login_count_4"),
    ColumnSpec::integer("login_count_5"),
    ColumnSpec::integer("login_count_6"),
    ColumnSpec::integer("login_count_7"),
    ColumnSpec::integer("login_count_8"),
    ColumnSpec::integer("login_count_9"),
    ColumnSpec::float("login_pmpm_ct"),
    ColumnSpec::integer("days_since_last_login"),
];

static MEMBER_DATA_COLUMNS: [ColumnSpec; 6] = [
    ColumnSpec::integer("consec_tenure_month"),
    ColumnSpec::integer("all_mm_tenure"),
    ColumnSpec::enumerated("tenure_band", &enums::TENURE_BAND),
    ColumnSpec::boolean("dual_eligible_ind"),
    ColumnSpec::boolean("disabled_ind"),
    ColumnSpec::boolean("lis_ind"),
];

static QUALITY_DATA_COLUMNS: [ColumnSpec; 7] = [
    ColumnSpec::integer("measurement_year"),
    ColumnSpec::enumerated("measure_name", &enums::MEASURE_NAME),
    ColumnSpec::text("measure_desc"),
    ColumnSpec::enumerated("measure_type", &enums::MEASURE_TYPE),
    ColumnSpec::date("base_event_date"),
    ColumnSpec::float("compliant_cnt"),
    ColumnSpec::integer("eligible_cnt"),
];

static MEMBER_DETAILS_COLUMNS: [ColumnSpec; 10] = [
    ColumnSpec::boolean("generic_grouper"),
    ColumnSpec::boolean("unattributed_provider"),
    ColumnSpec::enumerated("sex_cd", &enums::SEX),
    ColumnSpec::integer("age"),
    ColumnSpec::boolean("veteran_ind"),
    ColumnSpec::enumerated("mco_contract_nbr", &enums::MCO_CONTRACT_NBR),
    ColumnSpec::integer("plan_benefit_package_id"),
    ColumnSpec::enumerated("state_of_residence", &enums::STATE),
    ColumnSpec::text("county_of_residence"),
    ColumnSpec::enumerated("race", &enums::RACE),
];

static MEMBER_CLAIMS_COLUMNS: [ColumnSpec; 26] = [
    ColumnSpec::integer("dos_year"),
    ColumnSpec::text("clm_unique_key"),
    ColumnSpec::date("serv_date_skey"),
    ColumnSpec::boolean("pcp_visit"),
    ColumnSpec::boolean("annual_wellness"),
    ColumnSpec::boolean("humana_paf"),
    ColumnSpec::boolean("preventative_visit"),
    ColumnSpec::boolean("comp_physical_exam"),
    ColumnSpec::boolean("ihwa"),
    ColumnSpec::boolean("fqhc_visit"),
    ColumnSpec::boolean("telehealth"),
    ColumnSpec::boolean("endocrinologist_visit"),
    ColumnSpec::boolean("oncolologist_visit"),
    ColumnSpec::boolean("radiologist_visit"),
    ColumnSpec::boolean("podiatrist_visit"),
    ColumnSpec::boolean("ophthalmologist_visit"),
    ColumnSpec::boolean("optometrist_visit"),
    ColumnSpec::boolean("physical_therapist_visit"),
    ColumnSpec::boolean("cardiologist_visit"),
    ColumnSpec::boolean("gastroenterologist_visit"),
    ColumnSpec::boolean("orthopedist_visit"),
    ColumnSpec::boolean("obgyn_visit"),
    ColumnSpec::boolean("nephroloogist_visit"),
    ColumnSpec::boolean("pulmonologist_visit"),
    ColumnSpec::boolean("urgent_care_visit"),
    ColumnSpec::boolean("er_visit"),
];

static MEMBER_CONDITION_COLUMNS: [ColumnSpec; 6] = [
    ColumnSpec::integer("cond_key"),
    ColumnSpec::enumerated("chronicity", &enums::CHRONICITY),
    ColumnSpec::text("cond_desc"),
    ColumnSpec::enumerated("hcc_model_type", &enums::HCC_MODEL_TYPE),
    ColumnSpec::enumerated("cms_model_vers_cd", &enums::CMS_MODEL_VERS),
    ColumnSpec::integer("membership_year"),
];

pub(super) static ENTITIES: &[EntitySpec] = &[
    EntitySpec {
        name: "humana_mays_target_members",
        table: "raw_target_members",
        cardinality: Cardinality::OneToOne,
        columns: &TARGET_MEMBERS_COLUMNS,
    },
    EntitySpec {
        name: "Additional Features",
        table: "raw_additional_features",
        cardinality: Cardinality::OneToOne,
        columns: &ADDITIONAL_FEATURES_COLUMNS,
    },
    EntitySpec {
        name: "Control Point",
        table: "raw_marketing_control_point",
        cardinality: Cardinality::OneToOne,
        columns: &MARKETING_CONTROL_POINT_COLUMNS,
    },
    EntitySpec {
        name: "Cost & Utilization",
        table: "raw_cost_and_utilization",
        cardinality: Cardinality::OneToOne,
        columns: &COST_AND_UTILIZATION_COLUMNS,
    },
    EntitySpec {
        name: "Demographics",
        table: "raw_demographics",
        cardinality: Cardinality::OneToOne,
        columns: &DEMOGRAPHICS_COLUMNS,
    },
    EntitySpec {
        name: "Pharmacy Utilization",
        table: "raw_pharmacy_utilization",
        cardinality: Cardinality::OneToOne,
        columns: &PHARMACY_UTILIZATION_COLUMNS,
    },
    EntitySpec {
        name: "Sales Channel",
        table: "raw_channel",
        cardinality: Cardinality::OneToOne,
        columns: &CHANNEL_COLUMNS,
    },
    EntitySpec {
        name: "Social Determinants of Health",
        table: "raw_social_determinants_of_health",
        cardinality: Cardinality::OneToOne,
        columns: &SOCIAL_DETERMINANTS_OF_HEALTH_COLUMNS,
    },
    EntitySpec {
        name: "Web Activity",
        table: "raw_web_activity",
        cardinality: Cardinality::OneToOne,
        columns: &WEB_ACTIVITY_COLUMNS,
    },
    EntitySpec {
        name: "MEMBER_DATA",
        table: "raw_member_data",
        cardinality: Cardinality::OneToOne,
        columns: &MEMBER_DATA_COLUMNS,
    },
    EntitySpec {
        name: "QUALITY_DATA",
        table: "raw_quality_data",
        cardinality: Cardinality::OneToMany,
        columns: &QUALITY_DATA_COLUMNS,
    },
    EntitySpec {
        name: "humana_mays_target_member_details",
        table: "raw_member_details",
        cardinality: Cardinality::OneToOne,
        columns: &MEMBER_DETAILS_COLUMNS,
    },
    EntitySpec {
        name: "humana_mays_target_member_visit_claims",
        table: "raw_member_claims",
        cardinality: Cardinality::OneToMany,
        columns: &MEMBER_CLAIMS_COLUMNS,
    },
    EntitySpec {
        name: "humana_mays_target_member_conditions",
        table: "raw_member_condition",
        cardinality: Cardinality::OneToMany,
        columns: &MEMBER_CONDITION_COLUMNS,
    },
];
