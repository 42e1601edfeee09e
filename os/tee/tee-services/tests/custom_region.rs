//! A secure region installed at boot replaces the layout defaults.

use tee_app_abi::Word;
use tee_memory_addresses::{AddressRange, PhysicalAddress, VirtualAddress};
use tee_services::ServiceError;
use tee_services::boundary::{
    SecureRegionBounds, SecureRegionError, install_secure_region, paddr_in_secure_region,
    secure_region, vaddr_in_secure_region,
};
use tee_services::ree_mem::ReeRegion;

fn wide() -> SecureRegionBounds {
    SecureRegionBounds {
        vaddr: AddressRange::new(VirtualAddress::new(0x4200_0000), VirtualAddress::new(0x4220_0000)),
        paddr: AddressRange::new(PhysicalAddress::new(0x2_0000), PhysicalAddress::new(0x12_0000)),
    }
}

/// Every test installs the same bounds; whichever runs first wins.
fn install_wide() {
    match install_secure_region(wide()) {
        Ok(()) | Err(SecureRegionError::AlreadyFixed(_)) => {}
        Err(e) => panic!("{e}"),
    }
    assert_eq!(*secure_region(), wide());
}

#[test]
fn installed_bounds_win_and_stay_fixed() {
    install_wide();

    assert!(vaddr_in_secure_region(0x4210_0000));
    assert!(!vaddr_in_secure_region(0x4220_0000));
    assert!(!paddr_in_secure_region(0x1_0000));
    assert!(paddr_in_secure_region(0x11_FFFF));

    let layout = SecureRegionBounds::from_layout();
    assert_eq!(
        install_secure_region(layout),
        Err(SecureRegionError::AlreadyFixed(layout))
    );
    assert_eq!(*secure_region(), wide());
}

#[test]
fn bounds_inside_a_page_are_refused() {
    let unaligned = SecureRegionBounds {
        paddr: AddressRange::new(PhysicalAddress::new(0x1_8000), PhysicalAddress::new(0x8_0000)),
        ..wide()
    };
    assert_eq!(
        install_secure_region(unaligned),
        Err(SecureRegionError::Unaligned(unaligned))
    );
    install_wide();
}

#[test]
fn ree_pointers_into_the_installed_window_are_refused() {
    install_wide();

    // Past the layout's secure window but inside the installed one.
    assert_eq!(ReeRegion::of::<u32>(0x4215_0000 as Word), Err(ServiceError::InvalidArg));
    assert_eq!(ReeRegion::bytes(0x421F_FFFF as Word, 1), Err(ServiceError::InvalidArg));
    assert!(ReeRegion::of::<u32>(0x4220_0000 as Word).is_ok());
}
