use crate::config::{Criteria, MatchConfig, Thresholds, THRESHOLDS};
use crate::matcher::{match_address, match_name, match_pesel};
use crate::model::{
    AddressColumns, EmployeeRecord, MatchInput, MatchResult, MatchRun, NameColumns, OutputRecord,
    OwnerRecord, PeselColumns, PreparedEmployee, PreparedOwner, RunMeta,
};
use crate::rank::rank_and_dedupe;
use crate::summary::compute_summary;

/// Run matching per config. Returns ranked, deduplicated rows + summary.
pub fn run(config: &MatchConfig, input: MatchInput) -> MatchRun {
    run_with_criteria(&config.name, config.criteria(), input)
}

/// Run matching for an explicit criteria set (no config file).
pub fn run_with_criteria(name: &str, criteria: Criteria, input: MatchInput) -> MatchRun {
    let employees = prepare_employees(input.employees);
    let owners = prepare_owners(input.owners);
    log::debug!(
        "prepared {} employee(s) and {} owner(s)",
        employees.len(),
        owners.len()
    );

    let matches = generate_matches(&employees, &owners, &criteria, &THRESHOLDS);
    let matched_pairs = matches.len();
    let rows = rank_and_dedupe(matches);

    let summary = compute_summary(employees.len(), owners.len(), matched_pairs, &rows);
    log::info!(
        "{} pair(s) evaluated, {} matched, {} row(s) after dedup",
        summary.pairs_evaluated,
        summary.matched_pairs,
        summary.rows
    );

    MatchRun {
        meta: RunMeta {
            config_name: name.to_string(),
            criteria: criteria.enabled().iter().map(|c| c.to_string()).collect(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
        },
        summary,
        rows,
        criteria,
    }
}

pub fn prepare_employees(records: Vec<EmployeeRecord>) -> Vec<PreparedEmployee> {
    records.into_iter().map(PreparedEmployee::new).collect()
}

pub fn prepare_owners(records: Vec<OwnerRecord>) -> Vec<PreparedOwner> {
    records.into_iter().map(PreparedOwner::new).collect()
}

/// Run every enabled matcher for one pair, in the fixed order
/// pesel → name/phonetic → address.
pub fn evaluate_pair(
    employee: &PreparedEmployee,
    owner: &PreparedOwner,
    criteria: &Criteria,
    thresholds: &Thresholds,
) -> MatchResult {
    let mut result = MatchResult::default();

    if criteria.pesel {
        if let Some(reason) =
            match_pesel(employee.record.pesel.as_deref(), owner.record.pesel.as_deref())
        {
            result.reasons.push(reason);
        }
    }

    if criteria.name_or_phonetic() {
        if let (Some(emp_name), Some(owner_name)) =
            (&employee.full_name_clean, &owner.owner_name_clean)
        {
            let name = match_name(emp_name, owner_name, thresholds);
            result.fuzz_ratio = result.fuzz_ratio.max(name.fuzz_ratio);
            result.phonetic_ratio = result.phonetic_ratio.max(name.phonetic_ratio);
            if let Some(reason) = name.tier.reason() {
                result.reasons.push(reason);
            }
        }
    }

    if criteria.address {
        if let Some(ref owner_address) = owner.address_clean {
            let address = match_address(&employee.address_clean, owner_address, thresholds);
            result.address_ratio = address.ratio;
            if let Some(reason) = address.reason {
                result.reasons.push(reason);
            }
        }
    }

    result.is_match = !result.reasons.is_empty();
    result
}

/// Evaluate the full employee × owner cross product (employee-major) and
/// collect an output row for every matched pair.
pub fn generate_matches(
    employees: &[PreparedEmployee],
    owners: &[PreparedOwner],
    criteria: &Criteria,
    thresholds: &Thresholds,
) -> Vec<OutputRecord> {
    let mut matches = Vec::new();

    for employee in employees {
        for owner in owners {
            let result = evaluate_pair(employee, owner, criteria, thresholds);
            if !result.is_match {
                continue;
            }
            log::debug!(
                "match: {:?} ~ {:?} ({})",
                employee.full_name_clean,
                owner.owner_name_clean,
                result.reason_label()
            );
            matches.push(build_output(employee, owner, &result, criteria));
        }
    }

    matches
}

fn build_output(
    employee: &PreparedEmployee,
    owner: &PreparedOwner,
    result: &MatchResult,
    criteria: &Criteria,
) -> OutputRecord {
    let emp = &employee.record;
    let own = &owner.record;

    let pesel = criteria.pesel.then(|| PeselColumns {
        company_owner_pesel: own.pesel.clone(),
        employee_pesel: emp.pesel.clone(),
        matching_pesel_flag: match_pesel(emp.pesel.as_deref(), own.pesel.as_deref()).is_some(),
    });

    let address = criteria.address.then(|| AddressColumns {
        company_address: own.address.clone(),
        employee_address: employee.full_address.clone(),
        matching_address_ratio: result.address_ratio,
    });

    let name = criteria.name_or_phonetic().then_some(NameColumns {
        matching_name_ratio: result.fuzz_ratio,
        phonetic_match_ratio: result.phonetic_ratio,
    });

    OutputRecord {
        company_name: own.company_name.clone(),
        company_owner_name: own.owner_name.clone(),
        employee_name: emp.name.clone(),
        employee_surname: emp.surname.clone(),
        match_reason: result.reason_label(),
        pesel,
        address,
        name,
        employee_key: emp.pesel.clone(),
    }
}
