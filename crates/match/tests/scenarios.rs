use ownercheck_match::config::Criterion;
use ownercheck_match::model::{NameColumns, OutputRecord};
use ownercheck_match::rank::rank_and_dedupe;
use ownercheck_match::{
    run, run_with_criteria, Criteria, EmployeeRecord, MatchConfig, MatchInput, OwnerRecord,
};

fn employee(name: &str, surname: &str, pesel: &str) -> EmployeeRecord {
    EmployeeRecord {
        name: Some(name.into()),
        surname: Some(surname.into()),
        pesel: Some(pesel.into()),
        street: Some("ul. Polna".into()),
        building_number: Some("1".into()),
        apartment_number: None,
        city: Some("Poznań".into()),
    }
}

fn owner(company: &str, owner_name: &str, pesel: &str, address: &str) -> OwnerRecord {
    OwnerRecord {
        company_name: Some(company.into()),
        owner_name: Some(owner_name.into()),
        pesel: Some(pesel.into()),
        address: Some(address.into()),
    }
}

fn criteria(list: &[Criterion]) -> Criteria {
    Criteria::from_list(list)
}

// -------------------------------------------------------------------------
// Identifier
// -------------------------------------------------------------------------

#[test]
fn shared_identifier_matches() {
    let input = MatchInput {
        employees: vec![employee("Jan", "Kowalski", "12345")],
        owners: vec![owner("Kowalski Transport", "Jan Kowalski", "12345", "Długa 1, Kraków")],
    };
    let result = run_with_criteria("pesel", criteria(&[Criterion::Pesel]), input);

    assert_eq!(result.rows.len(), 1);
    let row = &result.rows[0];
    assert!(row.match_reason.contains("pesel"));
    assert!(row.pesel.as_ref().unwrap().matching_pesel_flag);
    assert!(row.name.is_none());
    assert!(row.address.is_none());
    assert_eq!(result.summary.reason_counts["pesel"], 1);
}

// -------------------------------------------------------------------------
// Phonetic
// -------------------------------------------------------------------------

#[test]
fn phonetic_tier_passing_pair() {
    let input = MatchInput {
        employees: vec![employee("Anna", "Nowak", "1")],
        owners: vec![owner("Novak Consulting", "Ana Novak", "2", "Krótka 3, Gdańsk")],
    };
    let result = run_with_criteria(
        "phonetic",
        criteria(&[Criterion::Name, Criterion::Phonetic]),
        input,
    );

    assert_eq!(result.rows.len(), 1);
    let row = &result.rows[0];
    assert_eq!(row.match_reason, "phonetic");
    let name = row.name.unwrap();
    assert_eq!(name.matching_name_ratio, 84);
    assert!(name.phonetic_match_ratio >= 50);
    assert!(row.pesel.is_none());
}

#[test]
fn phonetic_tier_failing_pair() {
    let input = MatchInput {
        employees: vec![employee("Anna", "Nowak", "1")],
        owners: vec![owner(
            "Brzęk",
            "Zbigniew Brzęczyszczykiewicz",
            "2",
            "Krótka 3, Gdańsk",
        )],
    };
    let result = run_with_criteria(
        "phonetic",
        criteria(&[Criterion::Name, Criterion::Phonetic]),
        input,
    );

    assert!(result.rows.is_empty());
    assert_eq!(result.summary.pairs_evaluated, 1);
    assert_eq!(result.summary.matched_pairs, 0);
}

// -------------------------------------------------------------------------
// Address
// -------------------------------------------------------------------------

#[test]
fn abbreviated_address_variants_match() {
    let mut e = employee("Marek", "Zając", "1");
    e.street = Some("ul. Kwiatowa".into());
    e.building_number = Some("5".into());
    e.apartment_number = Some("2".into());
    e.city = Some("Warszawa".into());

    let input = MatchInput {
        employees: vec![e],
        owners: vec![owner("Kwiaty", "Ewa Lis", "2", "Kwiatowa 5 apt 2 Warszawa")],
    };
    let result = run_with_criteria("address", criteria(&[Criterion::Address]), input);

    assert_eq!(result.rows.len(), 1);
    let address = result.rows[0].address.as_ref().unwrap();
    assert_eq!(result.rows[0].match_reason, "address");
    assert_eq!(address.employee_address, "ul. Kwiatowa, 5/2, Warszawa");
    assert!(address.matching_address_ratio >= 80);
}

// -------------------------------------------------------------------------
// Ranking + deduplication
// -------------------------------------------------------------------------

fn ranked_row(owner_name: &str, pesel: &str, ratio: u8) -> OutputRecord {
    OutputRecord {
        company_name: Some(format!("{owner_name} Sp. z o.o.")),
        company_owner_name: Some(owner_name.into()),
        employee_name: Some("Jan".into()),
        employee_surname: Some("Kowalski".into()),
        match_reason: "surname+initial".into(),
        pesel: None,
        address: None,
        name: Some(NameColumns {
            matching_name_ratio: ratio,
            phonetic_match_ratio: 0,
        }),
        employee_key: Some(pesel.into()),
    }
}

#[test]
fn shared_identifier_keeps_highest_name_ratio() {
    let rows = vec![
        ranked_row("Jan Kowalczyk", "85010112345", 70),
        ranked_row("Jan Kowalski", "85010112345", 95),
    ];
    let ranked = rank_and_dedupe(rows);

    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].company_owner_name.as_deref(), Some("Jan Kowalski"));
    assert_eq!(ranked[0].name_ratio(), 95);
}

#[test]
fn employees_sharing_identifier_collapse_to_best_row() {
    let input = MatchInput {
        employees: vec![
            employee("Jan", "Kowalski", "111"),
            employee("Piotr", "Zielinski", "111"),
        ],
        owners: vec![
            owner("Kowalski Transport", "Jan Kowalski", "5", "Długa 1, Kraków"),
            owner("Zieliński Bud", "Piotr Zielinsky", "6", "Krótka 3, Gdańsk"),
        ],
    };
    let result = run_with_criteria("dedup", criteria(&[Criterion::Name]), input);

    assert_eq!(result.summary.matched_pairs, 2);
    assert_eq!(result.summary.rows, 1);
    assert_eq!(result.summary.duplicates_dropped, 1);
    let row = &result.rows[0];
    assert_eq!(row.company_owner_name.as_deref(), Some("Jan Kowalski"));
    assert_eq!(row.name_ratio(), 100);
}

// -------------------------------------------------------------------------
// Config-driven run
// -------------------------------------------------------------------------

#[test]
fn config_run_reports_meta_and_columns() {
    let config = MatchConfig::from_toml(
        r#"
name = "Quarterly owner cross-check"
criteria = ["pesel", "address"]

[employees]
file = "employees.csv"

[owners]
file = "owners.csv"
"#,
    )
    .unwrap();

    let input = MatchInput {
        employees: vec![employee("Jan", "Kowalski", "12345")],
        owners: vec![
            owner("Kowalski Transport", "Jan Kowalski", "12345", "Długa 1, Kraków"),
            owner("Other", "Zofia Lis", "999", "Morska 8, Gdynia"),
        ],
    };
    let result = run(&config, input);

    assert_eq!(result.meta.config_name, "Quarterly owner cross-check");
    assert_eq!(result.meta.criteria, vec!["pesel", "address"]);
    assert_eq!(result.meta.engine_version, env!("CARGO_PKG_VERSION"));
    assert_eq!(result.summary.pairs_evaluated, 2);
    assert_eq!(result.rows.len(), 1);
    assert_eq!(result.columns().len(), 11);
    assert_eq!(result.rows[0].cells().len(), 11);

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["rows"][0]["employee_PESEL"], "12345");
    assert!(json["rows"][0].get("matching_name_ratio").is_none());
    assert_eq!(json["summary"]["rows"], 1);
}

#[test]
fn empty_inputs_produce_empty_run() {
    let result = run_with_criteria("empty", Criteria::all(), MatchInput::default());
    assert!(result.rows.is_empty());
    assert_eq!(result.summary.pairs_evaluated, 0);
    assert_eq!(result.columns().len(), 13);
}
