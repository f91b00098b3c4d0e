// Map loaded tables onto typed employee / owner records

use std::path::Path;

use ownercheck_match::{EmployeeRecord, OwnerRecord};

use crate::table::{load_table, Table};

pub const EMPLOYEE_COLUMNS: [&str; 6] =
    ["name", "surname", "pesel", "street", "building_number", "city"];
pub const OWNER_COLUMNS: [&str; 4] = ["company_name", "owner_name", "pesel", "address"];

pub fn load_employees(path: &Path, sheet: Option<&str>) -> Result<Vec<EmployeeRecord>, String> {
    let table = load_table(path, sheet)?;
    employees_from_table(&table)
}

pub fn load_owners(path: &Path, sheet: Option<&str>) -> Result<Vec<OwnerRecord>, String> {
    let table = load_table(path, sheet)?;
    owners_from_table(&table)
}

pub fn employees_from_table(table: &Table) -> Result<Vec<EmployeeRecord>, String> {
    let [name, surname, pesel, street, building, city] =
        require_columns("employees", table, EMPLOYEE_COLUMNS)?;
    let apartment = table.column_index("apartment_number");

    let records = table
        .rows
        .iter()
        .map(|row| {
            let get = |col: usize| Table::cell(row, col).map(str::to_string);
            EmployeeRecord {
                name: get(name),
                surname: get(surname),
                pesel: get(pesel),
                street: get(street),
                building_number: get(building),
                apartment_number: apartment.and_then(get),
                city: get(city),
            }
        })
        .collect::<Vec<_>>();

    log::info!("loaded {} employee(s)", records.len());
    Ok(records)
}

pub fn owners_from_table(table: &Table) -> Result<Vec<OwnerRecord>, String> {
    let [company, owner, pesel, address] = require_columns("owners", table, OWNER_COLUMNS)?;

    let records = table
        .rows
        .iter()
        .map(|row| {
            let get = |col: usize| Table::cell(row, col).map(str::to_string);
            OwnerRecord {
                company_name: get(company),
                owner_name: get(owner),
                pesel: get(pesel),
                address: get(address),
            }
        })
        .collect::<Vec<_>>();

    log::info!("loaded {} owner(s)", records.len());
    Ok(records)
}

fn require_columns<const N: usize>(
    role: &str,
    table: &Table,
    names: [&str; N],
) -> Result<[usize; N], String> {
    let mut indices = [0usize; N];
    for (slot, name) in indices.iter_mut().zip(names) {
        *slot = table
            .column_index(name)
            .ok_or_else(|| format!("{role}: missing column '{name}'"))?;
    }
    Ok(indices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_load_employees_csv() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("employees.csv");
        fs::write(
            &path,
            "Name,Surname,PESEL,Street,Building Number,Apartment Number,City\n\
             Jan,Kowalski,85010112345,ul. Kwiatowa,5,2,Warszawa\n\
             Anna,Nowak,,Długa,10,,Kraków\n",
        )
        .unwrap();

        let employees = load_employees(&path, None).unwrap();
        assert_eq!(employees.len(), 2);
        assert_eq!(employees[0].building_number.as_deref(), Some("5"));
        assert_eq!(employees[0].apartment_number.as_deref(), Some("2"));
        assert_eq!(employees[1].pesel, None);
        assert_eq!(employees[1].apartment_number, None);
        assert_eq!(employees[1].city.as_deref(), Some("Kraków"));
    }

    #[test]
    fn test_apartment_column_optional() {
        let table = Table::from_grid(vec![
            ["name", "surname", "pesel", "street", "building_number", "city"]
                .iter()
                .map(|s| Some(s.to_string()))
                .collect(),
            vec![Some("Jan".into()), None, Some("1".into())],
        ]);
        let employees = employees_from_table(&table).unwrap();
        assert_eq!(employees.len(), 1);
        assert_eq!(employees[0].surname, None);
        assert_eq!(employees[0].city, None);
        assert_eq!(employees[0].apartment_number, None);
    }

    #[test]
    fn test_load_owners_tsv() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("owners.tsv");
        fs::write(
            &path,
            "company_name\towner_name\tpesel\taddress\n\
             Kwiat s.c.\tJan Kowalski\t85010112345\tKwiatowa 5 apt 2 Warszawa\n",
        )
        .unwrap();

        let owners = load_owners(&path, None).unwrap();
        assert_eq!(owners.len(), 1);
        assert_eq!(owners[0].company_name.as_deref(), Some("Kwiat s.c."));
        assert_eq!(owners[0].address.as_deref(), Some("Kwiatowa 5 apt 2 Warszawa"));
    }

    #[test]
    fn test_missing_required_column() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("owners.csv");
        fs::write(&path, "company_name,owner_name,address\nAcme,Jan Kowalski,Długa 1\n").unwrap();

        let err = load_owners(&path, None).unwrap_err();
        assert_eq!(err, "owners: missing column 'pesel'");
    }
}
