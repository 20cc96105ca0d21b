//! Contract bindings for tokens, the swap router and the position manager.

use alloy::primitives::aliases::I24;
use alloy::sol;

sol! {
    #[allow(missing_docs)]
    #[sol(rpc)]
    interface IERC20 {
        function balanceOf(address account) external view returns (uint256);
        function decimals() external view returns (uint8);
        function allowance(address owner, address spender) external view returns (uint256);
        function approve(address spender, uint256 amount) external returns (bool);
    }
}

sol! {
    #[allow(missing_docs)]
    #[sol(rpc)]
    interface ISwapRouter {
        struct ExactInputSingleParams {
            address tokenIn;
            address tokenOut;
            uint24 fee;
            address recipient;
            uint256 amountIn;
            uint256 amountOutMinimum;
            uint160 sqrtPriceLimitX96;
        }

        function exactInputSingle(ExactInputSingleParams calldata params) external payable returns (uint256 amountOut);

        /// Batched calls guarded by a deadline.
        function multicall(uint256 deadline, bytes[] calldata data) external payable returns (bytes[] memory results);
    }
}

sol! {
    #[allow(missing_docs)]
    #[sol(rpc)]
    interface IPositionManager {
        struct MintParams {
            address token0;
            address token1;
            uint24 fee;
            int24 tickLower;
            int24 tickUpper;
            uint256 amount0Desired;
            uint256 amount1Desired;
            uint256 amount0Min;
            uint256 amount1Min;
            address recipient;
            uint256 deadline;
        }

        function mint(MintParams calldata params) external payable returns (uint256 tokenId, uint128 liquidity, uint256 amount0, uint256 amount1);

        function refundETH() external payable;

        function multicall(bytes[] calldata data) external payable returns (bytes[] memory results);
    }
}

/// Largest tick representable by a concentrated-liquidity pool.
pub const MAX_TICK: i32 = 887_272;

/// Tick spacing of a fee tier.
pub fn tick_spacing(fee: u32) -> i32 {
    match fee {
        100 => 1,
        500 => 10,
        3000 => 60,
        _ => 200,
    }
}

/// Lowest and highest usable ticks for a full-range position.
pub fn full_range_ticks(fee: u32) -> (I24, I24) {
    let spacing = tick_spacing(fee);
    let upper = (MAX_TICK / spacing) * spacing;
    (I24::unchecked_from(-upper), I24::unchecked_from(upper))
}
