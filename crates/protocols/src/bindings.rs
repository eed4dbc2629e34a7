//! Solidity interfaces of every contract the flow calls.

use alloy::sol;

sol! {
    #[sol(rpc)]
    interface IUniswapV3Factory {
        function getPool(address tokenA, address tokenB, uint24 fee) external view returns (address pool);
    }

    #[sol(rpc)]
    interface IUniswapV3Pool {
        function tickSpacing() external view returns (int24);
        function fee() external view returns (uint24);
        function liquidity() external view returns (uint128);
        function slot0() external view returns (
            uint160 sqrtPriceX96,
            int24 tick,
            uint16 observationIndex,
            uint16 observationCardinality,
            uint16 observationCardinalityNext,
            uint8 feeProtocol,
            bool unlocked
        );
    }

    #[sol(rpc)]
    interface INonfungiblePositionManager {
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

        event IncreaseLiquidity(uint256 indexed tokenId, uint128 liquidity, uint256 amount0, uint256 amount1);

        function mint(MintParams calldata params) external payable returns (
            uint256 tokenId,
            uint128 liquidity,
            uint256 amount0,
            uint256 amount1
        );
    }

    #[sol(rpc)]
    interface IERC20 {
        function name() external view returns (string);
        function symbol() external view returns (string);
        function decimals() external view returns (uint8);
        function totalSupply() external view returns (uint256);
        function balanceOf(address owner) external view returns (uint256);
        function allowance(address owner, address spender) external view returns (uint256);
        function approve(address spender, uint256 amount) external returns (bool);
    }

    #[sol(rpc)]
    interface ITokenHolders {
        function getTokenHolders() external view returns (address[] memory);
    }

    #[sol(rpc)]
    interface ILiquidityLedger {
        struct Liquidity {
            uint256 id;
            string network;
            address owner;
            address poolAddress;
            string tokenA;
            string tokenB;
            address tokenA_Address;
            address tokenB_Address;
            uint256 timeCreated;
            string transactionHash;
        }

        function addLiquidity(
            string memory tokenA,
            string memory tokenB,
            address tokenA_Address,
            address tokenB_Address,
            address poolAddress,
            string memory network,
            string memory transactionHash
        ) external;

        function getAllLiquidity(address owner) external view returns (Liquidity[] memory);
    }

    #[sol(rpc)]
    interface ITokenSale {
        function tokenPrice() external view returns (uint256);
        function tokenSold() external view returns (uint256);
        function buyTokens(uint256 numberOfTokens) external payable;
    }
}
