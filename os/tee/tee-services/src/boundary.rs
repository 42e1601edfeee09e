//! Secure-region boundary checks for REE-initiated MMU operations.
//!
//! The secure partition owns one range of the flash MMU's virtual window
//! and one range of physical flash. A request from the REE whose virtual
//! or physical span intersects either range is refused before the MMU is
//! touched. Spans are widened to whole MMU pages first, since that is the
//! granularity the MMU maps at, and installed bounds must be page aligned.

use log::warn;
use tee_memory_addresses::{AddressRange, PageSize, PhysicalAddress, VirtualAddress};
use tee_mmu::MmuPage;
use tee_sync::SyncOnceCell;

/// Virtual and physical extent of the secure partition.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct SecureRegionBounds {
    pub vaddr: AddressRange<VirtualAddress>,
    pub paddr: AddressRange<PhysicalAddress>,
}

/// A request that would reach into the secure partition.
#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
pub enum BoundaryViolation {
    #[error("virtual address {0} overlaps the secure region")]
    Vaddr(VirtualAddress),
    #[error("physical address {0} overlaps the secure region")]
    Paddr(PhysicalAddress),
}

/// Refusal to install a secure region.
#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
pub enum SecureRegionError {
    #[error("secure region {0:?} is not aligned to MMU pages")]
    Unaligned(SecureRegionBounds),
    #[error("the secure region is already fixed")]
    AlreadyFixed(SecureRegionBounds),
}

/// `[addr, addr + len)` widened to whole MMU pages, as `(start, len)`.
fn page_span(addr: u32, len: u32) -> (u32, u32) {
    let start = addr & !(MmuPage::SIZE - 1);
    let end = (u64::from(addr) + u64::from(len)).next_multiple_of(u64::from(MmuPage::SIZE));
    (start, u32::try_from(end - u64::from(start)).unwrap_or(u32::MAX))
}

impl SecureRegionBounds {
    /// Bounds derived from the build-time partition layout.
    #[must_use]
    pub fn from_layout() -> Self {
        Self {
            vaddr: tee_info::secure_vaddr_range(),
            paddr: tee_info::secure_paddr_range(),
        }
    }

    /// Whether all four bounds sit on MMU page boundaries.
    #[must_use]
    pub const fn is_page_aligned(&self) -> bool {
        self.vaddr.start().is_aligned::<MmuPage>()
            && self.vaddr.end().is_aligned::<MmuPage>()
            && self.paddr.start().is_aligned::<MmuPage>()
            && self.paddr.end().is_aligned::<MmuPage>()
    }

    #[must_use]
    pub fn vaddr_in_secure_region(&self, vaddr: VirtualAddress) -> bool {
        self.vaddr.contains(vaddr)
    }

    #[must_use]
    pub fn paddr_in_secure_region(&self, paddr: PhysicalAddress) -> bool {
        self.paddr.contains(paddr)
    }

    /// Whether the pages covering `[vaddr, vaddr + len)` intersect the
    /// secure virtual range. A zero length degrades to a point check.
    #[must_use]
    pub fn vaddr_span_in_secure_region(&self, vaddr: VirtualAddress, len: u32) -> bool {
        if len == 0 {
            return self.vaddr_in_secure_region(vaddr);
        }
        let (start, len) = page_span(vaddr.as_u32(), len);
        self.vaddr
            .overlaps(&AddressRange::<VirtualAddress>::from_start_len(VirtualAddress::new(start), len))
    }

    /// Whether the pages covering `[paddr, paddr + len)` intersect the
    /// secure physical range. A zero length degrades to a point check.
    #[must_use]
    pub fn paddr_span_in_secure_region(&self, paddr: PhysicalAddress, len: u32) -> bool {
        if len == 0 {
            return self.paddr_in_secure_region(paddr);
        }
        let (start, len) = page_span(paddr.as_u32(), len);
        self.paddr
            .overlaps(&AddressRange::<PhysicalAddress>::from_start_len(PhysicalAddress::new(start), len))
    }
}

impl Default for SecureRegionBounds {
    fn default() -> Self {
        Self::from_layout()
    }
}

static SECURE_REGION: SyncOnceCell<SecureRegionBounds> = SyncOnceCell::new();

/// Fix the secure region for the rest of the boot.
///
/// # Errors
/// * [`SecureRegionError::Unaligned`] if a bound falls inside an MMU page.
/// * [`SecureRegionError::AlreadyFixed`] if the region was already fixed,
///   either by an earlier call or by the first check falling back to the
///   layout defaults.
pub fn install_secure_region(bounds: SecureRegionBounds) -> Result<(), SecureRegionError> {
    if !bounds.is_page_aligned() {
        return Err(SecureRegionError::Unaligned(bounds));
    }
    SECURE_REGION
        .set(bounds)
        .map(|_| ())
        .map_err(SecureRegionError::AlreadyFixed)
}

/// The active secure region, the layout defaults unless one was installed.
pub fn secure_region() -> &'static SecureRegionBounds {
    SECURE_REGION.get_or_init(SecureRegionBounds::from_layout)
}

#[must_use]
pub fn vaddr_in_secure_region(vaddr: u32) -> bool {
    secure_region().vaddr_in_secure_region(VirtualAddress::new(vaddr))
}

#[must_use]
pub fn paddr_in_secure_region(paddr: u32) -> bool {
    secure_region().paddr_in_secure_region(PhysicalAddress::new(paddr))
}

/// Check a virtual span, logging a refused one.
///
/// # Errors
/// [`BoundaryViolation::Vaddr`] if the span reaches into the secure region.
pub fn check_vaddr(vaddr: u32, len: u32) -> Result<(), BoundaryViolation> {
    let vaddr = VirtualAddress::new(vaddr);
    if secure_region().vaddr_span_in_secure_region(vaddr, len) {
        let violation = BoundaryViolation::Vaddr(vaddr);
        warn!(target: "tee_services", "{violation}");
        return Err(violation);
    }
    Ok(())
}

/// Check a physical span, logging a refused one.
///
/// # Errors
/// [`BoundaryViolation::Paddr`] if the span reaches into the secure region.
pub fn check_paddr(paddr: u32, len: u32) -> Result<(), BoundaryViolation> {
    let paddr = PhysicalAddress::new(paddr);
    if secure_region().paddr_span_in_secure_region(paddr, len) {
        let violation = BoundaryViolation::Paddr(paddr);
        warn!(target: "tee_services", "{violation}");
        return Err(violation);
    }
    Ok(())
}
