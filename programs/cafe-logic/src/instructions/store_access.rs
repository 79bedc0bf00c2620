use anchor_lang::prelude::*;
use cafe_storage::cpi::accounts::{ReleaseFunds, WriteCustomerField, WriteSeatOccupant};
use cafe_storage::state::{CustomerRecord, SeatRecord};
use crate::errors::LogicError;
use crate::state::WRITER_SEED;

/// Read a customer record, or its vacant state if no write created it yet
pub fn load_customer(info: &AccountInfo, customer: &Pubkey) -> Result<CustomerRecord> {
    if info.data_is_empty() {
        return Ok(CustomerRecord::vacant(*customer));
    }
    require_keys_eq!(*info.owner, cafe_storage::ID, LogicError::ForeignRecord);
    let data = info.try_borrow_data()?;
    let record = CustomerRecord::try_deserialize(&mut &data[..])?;
    Ok(record)
}

/// Read a seat record, or a free seat if no write created it yet
pub fn load_seat(info: &AccountInfo, seat_number: u32) -> Result<SeatRecord> {
    if info.data_is_empty() {
        return Ok(SeatRecord::vacant(seat_number));
    }
    require_keys_eq!(*info.owner, cafe_storage::ID, LogicError::ForeignRecord);
    let data = info.try_borrow_data()?;
    let record = SeatRecord::try_deserialize(&mut &data[..])?;
    Ok(record)
}

/// Issues store writes signed by this program's writer PDA
///
/// The store only accepts writes from the writer it has registered, so these
/// calls fail with the store's `Unauthorized` once this program is swapped
/// out.
pub struct StoreWriter<'info> {
    storage_program: AccountInfo<'info>,
    store: AccountInfo<'info>,
    writer: AccountInfo<'info>,
    payer: AccountInfo<'info>,
    system_program: AccountInfo<'info>,
    writer_bump: u8,
}

impl<'info> StoreWriter<'info> {
    pub fn new(
        storage_program: AccountInfo<'info>,
        store: AccountInfo<'info>,
        writer: AccountInfo<'info>,
        payer: AccountInfo<'info>,
        system_program: AccountInfo<'info>,
        writer_bump: u8,
    ) -> Self {
        Self {
            storage_program,
            store,
            writer,
            payer,
            system_program,
            writer_bump,
        }
    }

    fn signed<R>(&self, write: impl FnOnce(&[&[&[u8]]]) -> Result<R>) -> Result<R> {
        let bump = [self.writer_bump];
        let signer_seeds: &[&[&[u8]]] = &[&[WRITER_SEED, &bump]];
        write(signer_seeds)
    }

    fn customer_field(
        &self,
        customer: &AccountInfo<'info>,
        customer_record: &AccountInfo<'info>,
    ) -> WriteCustomerField<'info> {
        WriteCustomerField {
            store: self.store.clone(),
            writer: self.writer.clone(),
            customer: customer.clone(),
            customer_record: customer_record.clone(),
            payer: self.payer.clone(),
            system_program: self.system_program.clone(),
        }
    }

    pub fn subscription_balance(
        &self,
        customer: &AccountInfo<'info>,
        customer_record: &AccountInfo<'info>,
        amount: u64,
    ) -> Result<()> {
        self.signed(|seeds| {
            cafe_storage::cpi::write_subscription_balance(
                CpiContext::new_with_signer(
                    self.storage_program.clone(),
                    self.customer_field(customer, customer_record),
                    seeds,
                ),
                amount,
            )
        })
    }

    pub fn payback_balance(
        &self,
        customer: &AccountInfo<'info>,
        customer_record: &AccountInfo<'info>,
        amount: u64,
    ) -> Result<()> {
        self.signed(|seeds| {
            cafe_storage::cpi::write_payback_balance(
                CpiContext::new_with_signer(
                    self.storage_program.clone(),
                    self.customer_field(customer, customer_record),
                    seeds,
                ),
                amount,
            )
        })
    }

    pub fn attendance(
        &self,
        customer: &AccountInfo<'info>,
        customer_record: &AccountInfo<'info>,
        continuous_days: u32,
        last_check_in_day: i64,
    ) -> Result<()> {
        self.signed(|seeds| {
            cafe_storage::cpi::write_attendance(
                CpiContext::new_with_signer(
                    self.storage_program.clone(),
                    self.customer_field(customer, customer_record),
                    seeds,
                ),
                continuous_days,
                last_check_in_day,
            )
        })
    }

    pub fn assigned_seat(
        &self,
        customer: &AccountInfo<'info>,
        customer_record: &AccountInfo<'info>,
        seat_number: u32,
    ) -> Result<()> {
        self.signed(|seeds| {
            cafe_storage::cpi::write_assigned_seat(
                CpiContext::new_with_signer(
                    self.storage_program.clone(),
                    self.customer_field(customer, customer_record),
                    seeds,
                ),
                seat_number,
            )
        })
    }

    pub fn seat_occupant(
        &self,
        seat_record: &AccountInfo<'info>,
        seat_number: u32,
        occupant: Pubkey,
    ) -> Result<()> {
        let accounts = WriteSeatOccupant {
            store: self.store.clone(),
            writer: self.writer.clone(),
            seat_record: seat_record.clone(),
            payer: self.payer.clone(),
            system_program: self.system_program.clone(),
        };
        self.signed(|seeds| {
            cafe_storage::cpi::write_seat_occupant(
                CpiContext::new_with_signer(self.storage_program.clone(), accounts, seeds),
                seat_number,
                occupant,
            )
        })
    }

    pub fn release_funds(
        &self,
        mint: &AccountInfo<'info>,
        vault: &AccountInfo<'info>,
        recipient: &AccountInfo<'info>,
        token_program: &AccountInfo<'info>,
        amount: u64,
    ) -> Result<()> {
        let accounts = ReleaseFunds {
            store: self.store.clone(),
            writer: self.writer.clone(),
            mint: mint.clone(),
            vault: vault.clone(),
            recipient: recipient.clone(),
            token_program: token_program.clone(),
        };
        self.signed(|seeds| {
            cafe_storage::cpi::release_funds(
                CpiContext::new_with_signer(self.storage_program.clone(), accounts, seeds),
                amount,
            )
        })
    }
}
