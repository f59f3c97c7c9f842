use crate::finance::loans::{InstallmentEntry, InstallmentTable, LoanAmount, TableError};

#[test]
fn standard_table_charges_one_and_a_half_percent() {
    let table = InstallmentTable::standard();

    for entry in table.entries() {
        assert_eq!(
            entry.installment * 1000,
            entry.amount.dinars() * 15,
            "installment for {} drifted from 1.5%",
            entry.amount
        );
    }
}

#[test]
fn standard_table_is_strictly_increasing() {
    let table = InstallmentTable::standard();
    let entries = table.entries();

    assert_eq!(entries.len(), 14);
    assert_eq!(entries.first().map(|e| e.amount), Some(LoanAmount(10_000_000)));
    assert_eq!(entries.last().map(|e| e.amount), Some(LoanAmount(100_000_000)));
    for pair in entries.windows(2) {
        assert!(pair[0].amount < pair[1].amount);
        assert!(pair[0].installment < pair[1].installment);
    }
}

#[test]
fn unknown_amount_falls_back_to_zero_installment() {
    let table = InstallmentTable::standard();

    assert_eq!(table.installment(LoanAmount(12_345_678)), 0);
    assert_eq!(table.lookup(LoanAmount(12_345_678)), None);
    assert!(!table.contains(LoanAmount(55_000_000)));
    assert_eq!(table.installment(LoanAmount(60_000_000)), 900_000);
}

#[test]
fn custom_table_rejects_duplicates_and_zero_installments() {
    let duplicate = InstallmentTable::new([
        InstallmentEntry {
            amount: LoanAmount(5_000_000),
            installment: 75_000,
        },
        InstallmentEntry {
            amount: LoanAmount(5_000_000),
            installment: 80_000,
        },
    ]);
    assert_eq!(duplicate, Err(TableError::DuplicateAmount(LoanAmount(5_000_000))));

    let zero = InstallmentTable::new([InstallmentEntry {
        amount: LoanAmount(5_000_000),
        installment: 0,
    }]);
    assert_eq!(zero, Err(TableError::ZeroInstallment(LoanAmount(5_000_000))));

    assert_eq!(
        InstallmentTable::new(Vec::new()),
        Err(TableError::Empty)
    );
}
